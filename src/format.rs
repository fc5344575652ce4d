//! Human-readable usage reports.
//!
//! Renders a turn's breakdown and the session totals as a short multi-line
//! report suitable for a tooltip or terminal.
//!
//! ```text
//! Token usage estimate
//!
//! [Current input]
//!   Text: 12 tokens
//!   Images: 825 tokens (1 image)
//!   Subtotal: 837 tokens
//!
//! [Accumulated]
//!   Input: 4,120 tokens
//!   Output: 9,804 tokens
//!   Total: 13,924 tokens
//! ```

use crate::types::TokenBreakdown;
use crate::usage::{AccumulatedTokens, BudgetStatus};

/// Formats a token count with `,` thousands separators.
///
/// # Examples
///
/// ```
/// use tokmeter::format::format_token_count;
///
/// assert_eq!(format_token_count(0), "0");
/// assert_eq!(format_token_count(999), "999");
/// assert_eq!(format_token_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_token_count(count: usize) -> String {
    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Renders a breakdown and the session totals.
///
/// Zero-valued input components are omitted; the subtotal and all three
/// accumulated fields are always shown.
#[must_use]
pub fn render(breakdown: &TokenBreakdown, accumulated: &AccumulatedTokens) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Token usage estimate".to_string());
    lines.push(String::new());

    lines.push("[Current input]".to_string());
    if breakdown.input_text_tokens > 0 {
        lines.push(format!("  Text: {}", tokens(breakdown.input_text_tokens)));
    }
    if breakdown.image_tokens > 0 {
        let noun = if breakdown.image_count == 1 {
            "image"
        } else {
            "images"
        };
        lines.push(format!(
            "  Images: {} ({} {})",
            tokens(breakdown.image_tokens),
            breakdown.image_count,
            noun
        ));
    }
    if breakdown.document_tokens > 0 {
        lines.push(format!("  Documents: {}", tokens(breakdown.document_tokens)));
    }
    lines.push(format!("  Subtotal: {}", tokens(breakdown.current_input_total)));
    lines.push(String::new());

    lines.push("[Accumulated]".to_string());
    lines.push(format!("  Input: {}", tokens(accumulated.total_input_tokens)));
    lines.push(format!("  Output: {}", tokens(accumulated.total_output_tokens)));
    lines.push(format!("  Total: {}", tokens(accumulated.total_tokens)));

    lines.join("\n")
}

/// Renders the projected request line shown under the report.
#[must_use]
pub fn render_request(breakdown: &TokenBreakdown) -> String {
    format!(
        "Estimated output: {}, request total: {}",
        tokens(breakdown.estimated_output_tokens),
        tokens(breakdown.estimated_request_total)
    )
}

/// Renders a one-line budget summary.
#[must_use]
pub fn render_budget(status: &BudgetStatus) -> String {
    match status {
        BudgetStatus::Ok { remaining } => {
            format!("Budget: {} remaining", tokens(*remaining))
        }
        BudgetStatus::Warning {
            usage_fraction,
            remaining,
        } => format!(
            "Budget warning: {:.0}% used, {} remaining",
            usage_fraction * 100.0,
            tokens(*remaining)
        ),
        BudgetStatus::Exceeded { projected, overage } => format!(
            "Budget exceeded: projected {}, {} over limit",
            tokens(*projected),
            tokens(*overage)
        ),
    }
}

fn tokens(count: usize) -> String {
    format!("{} tokens", format_token_count(count))
}
