//! Unit tests for image token estimation.
//!
//! These tests pin the tiling rule at its boundaries: the 2048px long-side
//! clamp, the 768px short-side lift, and the 512px tile grid.

use proptest::prelude::*;
use tokmeter::tokens::image::{
    count_image_tokens, count_image_tokens_by_count, scale_for_tiling, tile_count, ImageDetail,
    FALLBACK_IMAGE_TOKENS, LOW_DETAIL_TOKENS, MAX_LONG_SIDE, TOKENS_PER_TILE,
};

// ============================================================================
// Tiling Rule
// ============================================================================

#[test]
fn test_2048_square() {
    assert_eq!(count_image_tokens(2048, 2048, ImageDetail::High), 2805);
}

#[test]
fn test_4096_square_matches_2048() {
    assert_eq!(count_image_tokens(4096, 4096, ImageDetail::High), 2805);
}

#[test]
fn test_100_square_lifts_to_768() {
    assert_eq!(count_image_tokens(100, 100, ImageDetail::High), 765);
}

#[test]
fn test_default_detail_is_high() {
    assert_eq!(ImageDetail::default(), ImageDetail::High);
}

#[test]
fn test_one_pixel_over_tile_boundary() {
    // short side already >= 768, so 3 x 3 tiles
    assert_eq!(scale_for_tiling(1025, 1025), (1025, 1025));
    assert_eq!(tile_count(1025, 1025), 9);
    assert_eq!(count_image_tokens(1025, 1025, ImageDetail::High), 85 + 170 * 9);
}

#[test]
fn test_portrait_phone_photo() {
    // 3024x4032 -> 1536x2048 -> 3 x 4 tiles
    assert_eq!(scale_for_tiling(3024, 4032), (1536, 2048));
    assert_eq!(count_image_tokens(3024, 4032, ImageDetail::High), 85 + 170 * 12);
}

#[test]
fn test_wide_banner_keeps_downscaled_size() {
    assert_eq!(scale_for_tiling(4000, 500), (2048, 256));
}

#[test]
fn test_by_count_uses_flat_rate() {
    assert_eq!(count_image_tokens_by_count(1), FALLBACK_IMAGE_TOKENS);
    assert_eq!(count_image_tokens_by_count(4), 3300);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_low_detail_is_constant(w in 1u32..20_000, h in 1u32..20_000) {
        prop_assert_eq!(count_image_tokens(w, h, ImageDetail::Low), LOW_DETAIL_TOKENS);
    }

    #[test]
    fn prop_scaled_long_side_within_limit(w in 1u32..20_000, h in 1u32..20_000) {
        let (sw, sh) = scale_for_tiling(w, h);
        prop_assert!(sw.max(sh) <= MAX_LONG_SIDE);
    }

    #[test]
    fn prop_tokens_are_base_plus_tiles(w in 1u32..20_000, h in 1u32..20_000) {
        let tokens = count_image_tokens(w, h, ImageDetail::High);
        prop_assert!(tokens >= LOW_DETAIL_TOKENS);
        let tiles = (tokens - LOW_DETAIL_TOKENS) / TOKENS_PER_TILE;
        prop_assert_eq!((tokens - LOW_DETAIL_TOKENS) % TOKENS_PER_TILE, 0);
        prop_assert!(tiles <= 16);
    }

    #[test]
    fn prop_auto_equals_high(w in 1u32..10_000, h in 1u32..10_000) {
        prop_assert_eq!(
            count_image_tokens(w, h, ImageDetail::Auto),
            count_image_tokens(w, h, ImageDetail::High)
        );
    }

    #[test]
    fn prop_orientation_does_not_matter(w in 1u32..10_000, h in 1u32..10_000) {
        prop_assert_eq!(
            count_image_tokens(w, h, ImageDetail::High),
            count_image_tokens(h, w, ImageDetail::High)
        );
    }
}
