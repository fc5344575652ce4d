//! Configuration types for Tokmeter.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields the standard estimation policy.
//!
//! ```toml
//! image_detail = "high"
//! fallback_image_tokens = 825
//! output_multiplier = 2.0
//!
//! [budget]
//! limit = 200000
//! warning_threshold = 0.8
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tokens::image::{ImageDetail, FALLBACK_IMAGE_TOKENS};
use crate::tokens::output::OUTPUT_MULTIPLIER;
use crate::usage::budget::TokenBudget;

/// Estimation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Detail mode used for images with known dimensions.
    pub image_detail: ImageDetail,

    /// Flat per-image estimate when dimensions are unknown.
    pub fallback_image_tokens: usize,

    /// Expected output size as a multiple of input size.
    pub output_multiplier: f64,

    /// Optional session budget used for quota warnings.
    pub budget: Option<TokenBudget>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            image_detail: ImageDetail::High,
            fallback_image_tokens: FALLBACK_IMAGE_TOKENS,
            output_multiplier: OUTPUT_MULTIPLIER as f64,
            budget: None,
        }
    }
}

impl EstimatorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = crate::util::get_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the multiplier is negative or not finite, or the
    /// budget is invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.output_multiplier.is_finite() || self.output_multiplier < 0.0 {
            bail!(
                "Output multiplier must be a non-negative number, got {}",
                self.output_multiplier
            );
        }
        if let Some(ref budget) = self.budget {
            budget.validate()?;
        }
        Ok(())
    }
}
