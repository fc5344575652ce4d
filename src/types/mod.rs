//! Core types for Tokmeter.
//!
//! This module contains the data model shared by the estimators:
//! attachments coming from the upload pipeline, the per-turn breakdown,
//! and the estimator configuration.

pub mod attachment;
pub mod breakdown;
pub mod config;

pub use attachment::{parse_manifest, Attachment, FileType, UploadStatus};
pub use breakdown::TokenBreakdown;
pub use config::EstimatorConfig;
