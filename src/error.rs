//! Centralized error types for Tokmeter.
//!
//! Estimation itself never fails: every counting function returns a
//! best-effort number. Errors only surface at the edges, where a caller
//! asks for the strict form of an operation (e.g. [`try_count_text_tokens`])
//! or crosses the save/load boundary for accumulated usage.
//!
//! # Example
//!
//! ```
//! use tokmeter::error::{EstimateError, EstimateResult};
//!
//! fn check_totals(input: usize, output: usize, total: usize) -> EstimateResult<()> {
//!     if input + output != total {
//!         return Err(EstimateError::usage_invariant("total does not match input + output"));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_totals(1, 2, 4).unwrap_err();
//! assert_eq!(err.module(), "usage");
//! assert!(!err.is_recoverable());
//! ```
//!
//! [`try_count_text_tokens`]: crate::tokens::text::try_count_text_tokens

use std::fmt;

/// Result type alias using `EstimateError`.
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Centralized error type for Tokmeter.
#[derive(Debug)]
pub enum EstimateError {
    // ============== Tokenizer Errors ==============
    /// The BPE encoder could not be constructed or used.
    TokenizerUnavailable {
        /// Description of the failure.
        message: String,
    },

    // ============== Usage Errors ==============
    /// Reading or writing persisted usage failed.
    UsageIo {
        /// The path being accessed.
        path: String,
        /// Description of the I/O error.
        message: String,
    },

    /// Persisted usage violates `total = input + output`.
    UsageInvariant {
        /// Description of the violation.
        message: String,
    },

    // ============== Attachment Errors ==============
    /// An attachment manifest could not be parsed.
    AttachmentManifest {
        /// Description of the parse error.
        message: String,
    },

    // ============== Wrapped Errors ==============
    /// Error from anyhow or other sources.
    Other {
        /// The wrapped error message.
        message: String,
        /// The original error, if available.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// ============== Constructor Methods ==============

impl EstimateError {
    /// Creates a tokenizer unavailable error.
    #[must_use]
    pub fn tokenizer_unavailable(message: impl Into<String>) -> Self {
        Self::TokenizerUnavailable {
            message: message.into(),
        }
    }

    /// Creates a usage I/O error.
    #[must_use]
    pub fn usage_io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UsageIo {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a usage invariant error.
    #[must_use]
    pub fn usage_invariant(message: impl Into<String>) -> Self {
        Self::UsageInvariant {
            message: message.into(),
        }
    }

    /// Creates an attachment manifest error.
    #[must_use]
    pub fn attachment_manifest(message: impl Into<String>) -> Self {
        Self::AttachmentManifest {
            message: message.into(),
        }
    }
}

// ============== Category Methods ==============

impl EstimateError {
    /// Returns `true` if the estimator recovers from this error on its own.
    ///
    /// A tokenizer failure degrades to the character heuristic; everything
    /// else has to be handled by the caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TokenizerUnavailable { .. })
    }

    /// Returns the module name where this error originated.
    #[must_use]
    pub fn module(&self) -> &'static str {
        match self {
            Self::TokenizerUnavailable { .. } => "tokens",
            Self::UsageIo { .. } | Self::UsageInvariant { .. } => "usage",
            Self::AttachmentManifest { .. } => "types",
            Self::Other { .. } => "unknown",
        }
    }
}

// ============== Display Implementation ==============

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenizerUnavailable { message } => {
                write!(f, "tokens: tokenizer unavailable: {}", message)
            }
            Self::UsageIo { path, message } => {
                write!(f, "usage: I/O error for '{}': {}", path, message)
            }
            Self::UsageInvariant { message } => {
                write!(f, "usage: invariant violated: {}", message)
            }
            Self::AttachmentManifest { message } => {
                write!(f, "types: invalid attachment manifest: {}", message)
            }
            Self::Other { message, .. } => {
                write!(f, "error: {}", message)
            }
        }
    }
}

// ============== Error Implementation ==============

impl std::error::Error for EstimateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Other {
                source: Some(src), ..
            } => Some(src.as_ref()),
            _ => None,
        }
    }
}

// ============== Conversion Implementations ==============

impl From<anyhow::Error> for EstimateError {
    fn from(err: anyhow::Error) -> Self {
        // anyhow::Error is not std::error::Error, so only the rendered chain is kept
        Self::Other {
            message: format!("{:#}", err),
            source: None,
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
