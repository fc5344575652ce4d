//! Thread-safe session usage tracker.
//!
//! Turns may complete on different threads (background jobs, UI event
//! handlers). All mutation goes through a single lock so readers never see
//! a total that disagrees with its parts.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::AccumulatedTokens;
use crate::types::TokenBreakdown;

/// Shared accumulator for a session's token usage.
#[derive(Debug, Default)]
pub struct UsageTracker {
    totals: Mutex<AccumulatedTokens>,
}

impl UsageTracker {
    /// Creates a tracker with zeroed totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker starting from previously saved totals.
    #[must_use]
    pub fn from_totals(totals: AccumulatedTokens) -> Self {
        Self {
            totals: Mutex::new(totals),
        }
    }

    /// Adds one completed turn.
    pub fn record_turn(&self, input_tokens: usize, output_tokens: usize) {
        let mut totals = self.lock();
        totals.record_turn(input_tokens, output_tokens);
        debug!(
            input = input_tokens,
            output = output_tokens,
            total = totals.total_tokens,
            "Recorded turn"
        );
    }

    /// Adds a turn using the breakdown's input and projected output.
    pub fn record_breakdown(&self, breakdown: &TokenBreakdown) {
        self.record_turn(
            breakdown.current_input_total,
            breakdown.estimated_output_tokens,
        );
    }

    /// Zeroes all counters.
    pub fn reset(&self) {
        self.lock().reset();
        debug!("Reset accumulated usage");
    }

    /// Returns a consistent copy of the current totals.
    #[must_use]
    pub fn snapshot(&self) -> AccumulatedTokens {
        *self.lock()
    }

    /// A panic while holding the lock cannot leave the totals half-updated,
    /// so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, AccumulatedTokens> {
        self.totals
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
