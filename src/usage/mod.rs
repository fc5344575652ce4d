//! Accumulated session usage.
//!
//! [`AccumulatedTokens`] is the running sum of tokens consumed across a
//! session. It is created zeroed at session start, grows by one
//! [`record_turn`](AccumulatedTokens::record_turn) per completed turn, and
//! is zeroed again by [`reset`](AccumulatedTokens::reset). Every
//! observation satisfies `total_tokens == total_input_tokens + total_output_tokens`.
//!
//! Nothing is persisted implicitly. Callers that want totals to survive a
//! restart use [`AccumulatedTokens::save`] and [`AccumulatedTokens::load`].
//!
//! # Example
//!
//! ```
//! use tokmeter::usage::AccumulatedTokens;
//!
//! let mut usage = AccumulatedTokens::default();
//! usage.record_turn(1200, 350);
//! usage.record_turn(800, 900);
//! assert_eq!(usage.total_tokens, 3250);
//!
//! usage.reset();
//! assert_eq!(usage.total_tokens, 0);
//! ```

pub mod budget;
pub mod tracker;

pub use budget::{BudgetStatus, TokenBudget};
pub use tracker::UsageTracker;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{EstimateError, EstimateResult};
use crate::types::TokenBreakdown;
use crate::util::atomic_write;

/// Running token totals for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulatedTokens {
    /// Input tokens across all recorded turns.
    pub total_input_tokens: usize,
    /// Output tokens across all recorded turns.
    pub total_output_tokens: usize,
    /// Input plus output.
    pub total_tokens: usize,
}

impl AccumulatedTokens {
    /// Adds one completed turn.
    pub fn record_turn(&mut self, input_tokens: usize, output_tokens: usize) {
        self.total_input_tokens = self.total_input_tokens.saturating_add(input_tokens);
        self.total_output_tokens = self.total_output_tokens.saturating_add(output_tokens);
        self.total_tokens = self
            .total_input_tokens
            .saturating_add(self.total_output_tokens);
    }

    /// Adds a turn using the breakdown's input and projected output.
    pub fn record_breakdown(&mut self, breakdown: &TokenBreakdown) {
        self.record_turn(
            breakdown.current_input_total,
            breakdown.estimated_output_tokens,
        );
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the totals are internally consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.total_input_tokens
            .checked_add(self.total_output_tokens)
            .map_or(self.total_tokens == usize::MAX, |sum| sum == self.total_tokens)
    }

    /// Writes the totals to `path` as JSON.
    ///
    /// The file is replaced atomically.
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::UsageIo` if the file cannot be written.
    pub fn save(&self, path: &Path) -> EstimateResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, &json)
            .map_err(|e| EstimateError::usage_io(path.display().to_string(), format!("{:#}", e)))?;
        debug!(path = %path.display(), total = self.total_tokens, "Saved accumulated usage");
        Ok(())
    }

    /// Reads totals previously written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns `EstimateError::UsageIo` if the file cannot be read or parsed,
    /// and `EstimateError::UsageInvariant` if the stored total does not
    /// equal input plus output.
    pub fn load(path: &Path) -> EstimateResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EstimateError::usage_io(path.display().to_string(), e.to_string()))?;
        let usage: Self = serde_json::from_str(&content)
            .map_err(|e| EstimateError::usage_io(path.display().to_string(), e.to_string()))?;
        if !usage.is_consistent() {
            return Err(EstimateError::usage_invariant(format!(
                "total {} != input {} + output {}",
                usage.total_tokens, usage.total_input_tokens, usage.total_output_tokens
            )));
        }
        Ok(usage)
    }

    /// Like [`load`](Self::load), but a missing file yields zeroed totals.
    ///
    /// # Errors
    ///
    /// Returns the same errors as `load` when the file exists.
    pub fn load_or_default(path: &Path) -> EstimateResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
