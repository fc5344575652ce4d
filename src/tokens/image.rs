//! Image token estimation using the vision tiling rule.
//!
//! In `low` detail an image costs a flat 85 tokens. Otherwise it is
//! rescaled and cut into 512px tiles:
//!
//! 1. If the long side exceeds 2048px, scale down so it equals 2048px.
//! 2. If the short side is then below 768px, scale up so it equals 768px,
//!    unless that would push the long side past 2048px.
//! 3. `tiles = ceil(w / 512) * ceil(h / 512)`
//! 4. `tokens = 85 + 170 * tiles`
//!
//! Both scalings preserve aspect ratio and round to the nearest pixel.
//!
//! # Example
//!
//! ```rust
//! use tokmeter::tokens::image::{count_image_tokens, ImageDetail};
//!
//! assert_eq!(count_image_tokens(1024, 1024, ImageDetail::Low), 85);
//! assert_eq!(count_image_tokens(2048, 2048, ImageDetail::High), 2805);
//! assert_eq!(count_image_tokens(100, 100, ImageDetail::High), 765);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat cost of a low-detail image, also the base cost of a tiled one.
pub const LOW_DETAIL_TOKENS: usize = 85;

/// Cost of each 512px tile.
pub const TOKENS_PER_TILE: usize = 170;

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 512;

/// Upper bound on the long side after rescaling.
pub const MAX_LONG_SIDE: u32 = 2048;

/// Target for the short side after rescaling.
pub const TARGET_SHORT_SIDE: u32 = 768;

/// Per-image estimate when dimensions are unknown.
pub const FALLBACK_IMAGE_TOKENS: usize = 825;

/// Image quality setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    /// Flat low-resolution rate.
    Low,
    /// Tiling rate.
    #[default]
    High,
    /// Billed like `High`.
    Auto,
}

impl ImageDetail {
    /// Returns the wire name of this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ImageDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized detail mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image detail: {0} (expected low, high or auto)")]
pub struct UnknownDetailError(pub String);

impl FromStr for ImageDetail {
    type Err = UnknownDetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            other => Err(UnknownDetailError(other.to_string())),
        }
    }
}

/// Returns the token cost of a `width` x `height` image.
///
/// Both dimensions must be positive. Zero is tolerated without panicking,
/// but the result is meaningless.
#[must_use]
pub fn count_image_tokens(width: u32, height: u32, detail: ImageDetail) -> usize {
    if detail == ImageDetail::Low {
        return LOW_DETAIL_TOKENS;
    }

    let (w, h) = scale_for_tiling(width, height);
    LOW_DETAIL_TOKENS + TOKENS_PER_TILE * tile_count(w, h)
}

/// Returns the flat estimate for `image_count` images of unknown size.
#[must_use]
pub fn count_image_tokens_by_count(image_count: usize) -> usize {
    image_count.saturating_mul(FALLBACK_IMAGE_TOKENS)
}

/// Rescales dimensions the way the tiling rule does before cutting tiles.
#[must_use]
pub fn scale_for_tiling(width: u32, height: u32) -> (u32, u32) {
    let (mut w, mut h) = (width, height);

    let max_side = w.max(h);
    if max_side > MAX_LONG_SIDE {
        let scale = f64::from(MAX_LONG_SIDE) / f64::from(max_side);
        w = scale_side(w, scale);
        h = scale_side(h, scale);
    }

    let min_side = w.min(h);
    if min_side < TARGET_SHORT_SIDE {
        let scale = f64::from(TARGET_SHORT_SIDE) / f64::from(min_side);
        let (new_w, new_h) = (scale_side(w, scale), scale_side(h, scale));
        // Upscaling is dropped for very elongated images
        if new_w.max(new_h) <= MAX_LONG_SIDE {
            w = new_w;
            h = new_h;
        }
    }

    (w, h)
}

/// Returns the number of 512px tiles covering a `width` x `height` image.
#[must_use]
pub fn tile_count(width: u32, height: u32) -> usize {
    let tiles_w = width.div_ceil(TILE_SIZE) as usize;
    let tiles_h = height.div_ceil(TILE_SIZE) as usize;
    tiles_w * tiles_h
}

/// `as` saturates on overflow and maps NaN to 0.
fn scale_side(side: u32, scale: f64) -> u32 {
    (f64::from(side) * scale).round() as u32
}
