//! Session token budgets and quota warnings.
//!
//! A budget projects the accumulated usage plus the request about to be
//! sent, and reports whether that crosses the warning threshold or the hard
//! limit.
//!
//! # Example
//!
//! ```
//! use tokmeter::usage::{AccumulatedTokens, BudgetStatus, TokenBudget};
//! use tokmeter::types::TokenBreakdown;
//!
//! let budget = TokenBudget::new(10_000, 0.8);
//! let mut usage = AccumulatedTokens::default();
//! usage.record_turn(3000, 4000);
//!
//! let next = TokenBreakdown::from_parts(500, 0, 0, 0, 1000);
//! match budget.check(&usage, &next) {
//!     BudgetStatus::Warning { remaining, .. } => assert_eq!(remaining, 1500),
//!     other => panic!("unexpected status: {other:?}"),
//! }
//! ```

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::AccumulatedTokens;
use crate::types::TokenBreakdown;

/// Token limit for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Maximum tokens for the session.
    pub limit: usize,
    /// Fraction of the limit (0.0-1.0) at which to warn.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,
}

fn default_warning_threshold() -> f64 {
    0.8
}

/// Where a projected total stands against a budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    /// Below the warning threshold.
    Ok {
        /// Tokens left after the projected request.
        remaining: usize,
    },
    /// At or above the warning threshold, within the limit.
    Warning {
        /// Projected usage as a fraction of the limit.
        usage_fraction: f64,
        /// Tokens left after the projected request.
        remaining: usize,
    },
    /// Over the limit.
    Exceeded {
        /// Projected session total.
        projected: usize,
        /// Tokens over the limit.
        overage: usize,
    },
}

impl BudgetStatus {
    /// Returns `true` if the user should be warned.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        !matches!(self, Self::Ok { .. })
    }
}

impl TokenBudget {
    /// Creates a new budget.
    #[must_use]
    pub fn new(limit: usize, warning_threshold: f64) -> Self {
        Self {
            limit,
            warning_threshold,
        }
    }

    /// Validates the budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the limit is zero or the threshold is outside 0.0-1.0.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            bail!("Budget limit must be positive");
        }
        if !(0.0..=1.0).contains(&self.warning_threshold) {
            bail!(
                "Warning threshold must be between 0.0 and 1.0, got {}",
                self.warning_threshold
            );
        }
        Ok(())
    }

    /// Checks accumulated usage plus the next request against the budget.
    #[must_use]
    pub fn check(&self, accumulated: &AccumulatedTokens, next: &TokenBreakdown) -> BudgetStatus {
        self.check_projected(
            accumulated
                .total_tokens
                .saturating_add(next.estimated_request_total),
        )
    }

    /// Checks a projected session total against the budget.
    #[must_use]
    pub fn check_projected(&self, projected: usize) -> BudgetStatus {
        if projected > self.limit {
            return BudgetStatus::Exceeded {
                projected,
                overage: projected - self.limit,
            };
        }

        let remaining = self.limit - projected;
        let usage_fraction = if self.limit == 0 {
            1.0
        } else {
            projected as f64 / self.limit as f64
        };

        if usage_fraction >= self.warning_threshold {
            BudgetStatus::Warning {
                usage_fraction,
                remaining,
            }
        } else {
            BudgetStatus::Ok { remaining }
        }
    }
}
