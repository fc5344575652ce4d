//! Document token estimation.
//!
//! Documents arrive with their text already extracted, so counting is the
//! same as for message text. This stays a separate entry point so
//! document-specific rules can change without touching text counting.

use super::text::{Cl100kCounter, TokenCounter};

/// Counts the tokens in a document's extracted text.
///
/// Absent or empty content is 0.
#[must_use]
pub fn count_document_tokens(content: Option<&str>) -> usize {
    count_document_tokens_with(&Cl100kCounter, content)
}

/// Counts a document's tokens with a specific counter.
#[must_use]
pub fn count_document_tokens_with(counter: &dyn TokenCounter, content: Option<&str>) -> usize {
    match content {
        Some(text) if !text.is_empty() => counter.count(text),
        _ => 0,
    }
}
