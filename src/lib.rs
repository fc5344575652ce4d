//! Tokmeter - Token usage estimation for multimodal LLM requests
//!
//! Predicts how many tokens a draft message and its attachments will
//! consume before the request is sent, and keeps a running session total
//! so users can be warned before hitting a quota.
//!
//! ```rust
//! use tokmeter::{compute_breakdown, format, Attachment, UsageTracker};
//!
//! let attachments = vec![
//!     Attachment::image("diagram.png", Some(1920), Some(1080)),
//!     Attachment::document("brief.pdf", "Landing page for a coffee shop ..."),
//! ];
//! let breakdown = compute_breakdown("Summarize the attached brief", &attachments);
//!
//! let tracker = UsageTracker::new();
//! tracker.record_breakdown(&breakdown);
//!
//! println!("{}", format::render(&breakdown, &tracker.snapshot()));
//! ```

pub mod error;
pub mod estimate;
pub mod format;
pub mod tokens;
pub mod types;
pub mod usage;
pub mod util;

// Re-export core types for convenient access
pub use estimate::{compute_breakdown, Estimator};
pub use types::{Attachment, EstimatorConfig, FileType, TokenBreakdown, UploadStatus};
pub use usage::{AccumulatedTokens, UsageTracker};
