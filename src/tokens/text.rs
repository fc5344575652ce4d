//! Text token counting.
//!
//! Text is counted with the cl100k_base byte-pair encoding. It is not the
//! tokenizer of every model family a request may be sent to, but it is a
//! much closer approximation than character ratios, especially for CJK text.
//!
//! The encoder is built once per process on first use and shared read-only
//! afterwards. If it cannot be built, counting degrades to
//! `ceil(chars / 4)` and logs a warning instead of failing.
//!
//! # Example
//!
//! ```rust
//! use tokmeter::tokens::text::count_text_tokens;
//!
//! assert_eq!(count_text_tokens(""), 0);
//! assert_eq!(count_text_tokens("   \n"), 0);
//! assert!(count_text_tokens("Hello, world!") >= 1);
//! ```

use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;
use tracing::{debug, warn};

use crate::error::{EstimateError, EstimateResult};

/// Characters per token assumed by the fallback heuristic.
pub const FALLBACK_CHARS_PER_TOKEN: usize = 4;

/// Process-wide encoder; construction errors are kept so every caller sees them.
static ENCODER: Lazy<Result<CoreBPE, String>> = Lazy::new(|| {
    debug!("Initializing cl100k_base tokenizer");
    tiktoken_rs::cl100k_base().map_err(|e| e.to_string())
});

/// Strategy for turning text into a token count.
///
/// Implementations must be infallible: degraded modes are handled inside.
pub trait TokenCounter: Send + Sync {
    /// Returns the number of tokens in `text`.
    fn count(&self, text: &str) -> usize;

    /// Returns the total tokens across `texts`.
    fn count_many(&self, texts: &[&str]) -> usize {
        texts.iter().map(|t| self.count(t)).sum()
    }
}

/// Counter backed by the shared cl100k_base encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cl100kCounter;

impl TokenCounter for Cl100kCounter {
    fn count(&self, text: &str) -> usize {
        count_text_tokens(text)
    }
}

/// Counter that divides the character count by a fixed ratio.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioCounter {
    chars_per_token: f64,
}

impl CharRatioCounter {
    /// Creates a counter with the default ratio of 4 characters per token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ratio(FALLBACK_CHARS_PER_TOKEN as f64)
    }

    /// Creates a counter with a custom ratio.
    ///
    /// Non-positive ratios are clamped to 1.
    #[must_use]
    pub fn with_ratio(chars_per_token: f64) -> Self {
        let chars_per_token = if chars_per_token > 0.0 {
            chars_per_token
        } else {
            1.0
        };
        Self { chars_per_token }
    }
}

impl Default for CharRatioCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for CharRatioCounter {
    fn count(&self, text: &str) -> usize {
        if is_blank(text) {
            return 0;
        }
        (text.chars().count() as f64 / self.chars_per_token).ceil() as usize
    }
}

/// Counts the tokens in `text`, never failing.
///
/// Empty or whitespace-only text is 0 without touching the encoder.
#[must_use]
pub fn count_text_tokens(text: &str) -> usize {
    if is_blank(text) {
        return 0;
    }
    resolve_count(text, try_count_text_tokens(text))
}

/// Counts the tokens in `text` with the encoder, surfacing failures.
///
/// # Errors
///
/// Returns `EstimateError::TokenizerUnavailable` if the encoder could not
/// be constructed.
pub fn try_count_text_tokens(text: &str) -> EstimateResult<usize> {
    if is_blank(text) {
        return Ok(0);
    }
    match &*ENCODER {
        Ok(encoder) => Ok(encoder.encode_ordinary(text).len()),
        Err(message) => Err(EstimateError::tokenizer_unavailable(message.clone())),
    }
}

/// Heuristic count used when the encoder is unavailable: `ceil(chars / 4)`.
#[must_use]
pub fn fallback_token_count(text: &str) -> usize {
    text.chars().count().div_ceil(FALLBACK_CHARS_PER_TOKEN)
}

/// Folds an encoder result into a count, falling back on error.
pub(crate) fn resolve_count(text: &str, result: EstimateResult<usize>) -> usize {
    match result {
        Ok(count) => count,
        Err(err) => {
            warn!(
                error = %err,
                chars = text.chars().count(),
                "Token encoding failed, using character heuristic"
            );
            fallback_token_count(text)
        }
    }
}

/// Sums the tokens across several texts.
#[must_use]
pub fn count_many(texts: &[&str]) -> usize {
    Cl100kCounter.count_many(texts)
}

/// Returns `true` if `token_count` exceeds `max_ratio` of the context window.
///
/// The threshold is truncated to a whole token count.
#[must_use]
pub fn exceeds_limit(token_count: usize, max_context_window: usize, max_ratio: f64) -> bool {
    let threshold = (max_context_window as f64 * max_ratio) as usize;
    token_count > threshold
}

/// Returns how much smaller a summary is than its source, as `1 - summary/original`.
///
/// Returns 0.0 when the original is empty.
#[must_use]
pub fn compression_ratio(original_tokens: usize, summary_tokens: usize) -> f64 {
    if original_tokens == 0 {
        return 0.0;
    }
    1.0 - summary_tokens as f64 / original_tokens as f64
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
