//! Output token projection.
//!
//! The response size is not known before the model answers. The projection
//! assumes it scales with the input: twice the input by default. It is a
//! budgeting heuristic, not a guarantee.

/// Default ratio of projected output to input.
pub const OUTPUT_MULTIPLIER: usize = 2;

/// Projects output tokens as twice the input.
#[must_use]
pub fn estimate_output_tokens(input_tokens: usize) -> usize {
    input_tokens.saturating_mul(OUTPUT_MULTIPLIER)
}

/// Projects output tokens as `ceil(input * multiplier)`.
///
/// Negative or non-finite multipliers project 0.
#[must_use]
pub fn estimate_output_tokens_with(input_tokens: usize, multiplier: f64) -> usize {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return 0;
    }
    (input_tokens as f64 * multiplier).ceil() as usize
}
