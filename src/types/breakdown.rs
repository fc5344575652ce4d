//! Per-turn token breakdown.

use serde::{Deserialize, Serialize};

/// Decomposition of one request's estimated token cost.
///
/// Recomputed on every call; it has no identity of its own. The totals
/// always satisfy:
///
/// - `current_input_total == input_text_tokens + image_tokens + document_tokens`
/// - `estimated_request_total == current_input_total + estimated_output_tokens`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBreakdown {
    /// Tokens in the draft message text.
    pub input_text_tokens: usize,
    /// Tokens for all counted images.
    pub image_tokens: usize,
    /// Tokens for all counted documents and text files.
    pub document_tokens: usize,
    /// Sum of the three input components.
    pub current_input_total: usize,
    /// Projected response size.
    pub estimated_output_tokens: usize,
    /// Input plus projected output.
    pub estimated_request_total: usize,
    /// Number of counted images.
    pub image_count: usize,
}

impl TokenBreakdown {
    /// Builds a breakdown from its components, deriving both totals.
    #[must_use]
    pub fn from_parts(
        input_text_tokens: usize,
        image_tokens: usize,
        document_tokens: usize,
        image_count: usize,
        estimated_output_tokens: usize,
    ) -> Self {
        let current_input_total = input_text_tokens
            .saturating_add(image_tokens)
            .saturating_add(document_tokens);
        Self {
            input_text_tokens,
            image_tokens,
            document_tokens,
            current_input_total,
            estimated_output_tokens,
            estimated_request_total: current_input_total.saturating_add(estimated_output_tokens),
            image_count,
        }
    }

    /// Returns `true` if nothing would be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current_input_total == 0
    }
}
