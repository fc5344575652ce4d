//! Token counting for message text, images, and documents.
//!
//! Each kind of input has its own estimator:
//!
//! | Input | Function | Rule |
//! |-------|----------|------|
//! | Text | [`count_text_tokens`] | cl100k_base BPE, `ceil(chars / 4)` on failure |
//! | Image | [`count_image_tokens`] | 512px tiling, flat 85 in low detail |
//! | Document | [`count_document_tokens`] | extracted text, counted as text |
//! | Output | [`estimate_output_tokens`] | twice the input |
//!
//! None of these functions fail or block; they are cheap enough to run on
//! every keystroke.

pub mod document;
pub mod image;
pub mod output;
pub mod text;

pub use document::count_document_tokens;
pub use image::{count_image_tokens, count_image_tokens_by_count, ImageDetail};
pub use output::estimate_output_tokens;
pub use text::{count_text_tokens, CharRatioCounter, Cl100kCounter, TokenCounter};
