//! Per-turn input breakdown.
//!
//! Combines the draft text and every attachment that finished processing
//! into a [`TokenBreakdown`], then projects the output size.
//!
//! # Example
//!
//! ```rust
//! use tokmeter::estimate::compute_breakdown;
//! use tokmeter::types::Attachment;
//!
//! let attachments = vec![Attachment::image("photo.png", None, None)];
//! let breakdown = compute_breakdown("Describe this photo", &attachments);
//!
//! assert_eq!(breakdown.image_count, 1);
//! assert_eq!(breakdown.image_tokens, 825);
//! assert_eq!(
//!     breakdown.estimated_request_total,
//!     breakdown.current_input_total + breakdown.estimated_output_tokens
//! );
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::tokens::document::count_document_tokens_with;
use crate::tokens::image::count_image_tokens;
use crate::tokens::output::estimate_output_tokens_with;
use crate::tokens::text::{Cl100kCounter, TokenCounter};
use crate::types::{Attachment, EstimatorConfig, FileType, TokenBreakdown};

/// Computes the breakdown with the default counter and policy.
#[must_use]
pub fn compute_breakdown(user_input: &str, attachments: &[Attachment]) -> TokenBreakdown {
    Estimator::default().compute_breakdown(user_input, attachments)
}

/// Breakdown calculator with a pluggable text counter and policy.
#[derive(Clone)]
pub struct Estimator {
    counter: Arc<dyn TokenCounter>,
    config: EstimatorConfig,
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl std::fmt::Debug for Estimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Estimator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Estimator {
    /// Creates an estimator using the cl100k_base counter.
    #[must_use]
    pub fn new(config: EstimatorConfig) -> Self {
        Self::with_counter(Arc::new(Cl100kCounter), config)
    }

    /// Creates an estimator with a custom text counter.
    #[must_use]
    pub fn with_counter(counter: Arc<dyn TokenCounter>, config: EstimatorConfig) -> Self {
        Self { counter, config }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Computes the token breakdown for one turn.
    ///
    /// Attachments that are still uploading, processing, or have failed
    /// contribute nothing. Images without both dimensions are billed at the
    /// flat fallback rate.
    #[must_use]
    pub fn compute_breakdown(&self, user_input: &str, attachments: &[Attachment]) -> TokenBreakdown {
        let input_text_tokens = self.counter.count(user_input);

        let mut image_count = 0;
        let mut image_tokens = 0usize;
        let mut document_tokens = 0usize;

        for attachment in attachments.iter().filter(|a| a.is_countable()) {
            match attachment.file_type {
                FileType::Image => {
                    image_count += 1;
                    let tokens = match attachment.dimensions() {
                        Some((w, h)) => count_image_tokens(w, h, self.config.image_detail),
                        None => self.config.fallback_image_tokens,
                    };
                    image_tokens = image_tokens.saturating_add(tokens);
                }
                FileType::Document | FileType::Text => {
                    let tokens = count_document_tokens_with(
                        self.counter.as_ref(),
                        attachment.content.as_deref(),
                    );
                    document_tokens = document_tokens.saturating_add(tokens);
                }
            }
        }

        let current_input_total = input_text_tokens
            .saturating_add(image_tokens)
            .saturating_add(document_tokens);
        let estimated_output_tokens =
            estimate_output_tokens_with(current_input_total, self.config.output_multiplier);

        let breakdown = TokenBreakdown::from_parts(
            input_text_tokens,
            image_tokens,
            document_tokens,
            image_count,
            estimated_output_tokens,
        );

        debug!(
            text = breakdown.input_text_tokens,
            images = breakdown.image_tokens,
            documents = breakdown.document_tokens,
            total = breakdown.estimated_request_total,
            "Computed token breakdown"
        );

        breakdown
    }
}
