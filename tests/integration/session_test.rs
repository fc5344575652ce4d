//! Integration tests for a multi-turn session.
//!
//! Tests the full flow a chat front-end drives:
//! - Estimating each draft as attachments finish processing
//! - Folding completed turns into the session totals
//! - Saving and restoring totals across restarts
//! - Budget warnings as the session grows

use crate::common::{unfinished_attachments, TestContext};
use tokmeter::format::render;
use tokmeter::usage::{AccumulatedTokens, BudgetStatus, TokenBudget, UsageTracker};
use tokmeter::{compute_breakdown, Attachment, UploadStatus};

/// Estimates change only when an attachment reaches `success`.
#[test]
fn test_estimate_follows_upload_lifecycle() {
    let draft = "Build a portfolio site from this mockup";
    let mut mockup = Attachment::image("mockup.png", Some(1440), Some(900))
        .with_status(UploadStatus::Uploading);

    let before = compute_breakdown(draft, std::slice::from_ref(&mockup));
    assert_eq!(before.image_count, 0);

    mockup.status = UploadStatus::Processing;
    assert_eq!(compute_breakdown(draft, std::slice::from_ref(&mockup)), before);

    mockup.status = UploadStatus::Success;
    let after = compute_breakdown(draft, std::slice::from_ref(&mockup));
    assert_eq!(after.image_count, 1);
    // already within bounds, 3 x 2 tiles
    assert_eq!(after.image_tokens, 85 + 170 * 6);
    assert_eq!(after.input_text_tokens, before.input_text_tokens);
}

/// Unfinished uploads never leak into the report.
#[test]
fn test_report_ignores_unfinished_uploads() {
    let breakdown = compute_breakdown("", &unfinished_attachments());
    let report = render(&breakdown, &AccumulatedTokens::default());
    assert!(!report.contains("Images"));
    assert!(!report.contains("Documents"));
}

/// Totals survive a save/load cycle and keep accumulating afterwards.
#[test]
fn test_usage_persists_across_restarts() {
    let ctx = TestContext::new();
    let path = ctx.usage_path();

    let first = UsageTracker::new();
    first.record_breakdown(&compute_breakdown(
        "Hello",
        &[Attachment::image("a.png", None, None)],
    ));
    first.snapshot().save(&path).unwrap();

    let restored = AccumulatedTokens::load(&path).unwrap();
    assert_eq!(restored, first.snapshot());

    let second = UsageTracker::from_totals(restored);
    second.record_turn(100, 200);
    let snap = second.snapshot();
    assert_eq!(snap.total_input_tokens, restored.total_input_tokens + 100);
    assert_eq!(snap.total_tokens, restored.total_tokens + 300);
}

/// A missing file starts a fresh session.
#[test]
fn test_load_or_default_without_file() {
    let ctx = TestContext::new();
    let usage = AccumulatedTokens::load_or_default(&ctx.usage_path()).unwrap();
    assert_eq!(usage, AccumulatedTokens::default());
}

/// Hand-edited files with inconsistent totals are rejected.
#[test]
fn test_tampered_usage_is_rejected() {
    let ctx = TestContext::new();
    let path = ctx.create_file(
        "usage.json",
        r#"{"totalInputTokens": 10, "totalOutputTokens": 20, "totalTokens": 99}"#,
    );
    let err = AccumulatedTokens::load(&path).unwrap_err();
    assert_eq!(err.module(), "usage");
    assert!(err.to_string().contains("invariant"));
}

/// Reset is persisted like any other change.
#[test]
fn test_reset_persists() {
    let ctx = TestContext::new();
    let path = ctx.usage_path();

    let mut usage = AccumulatedTokens::default();
    usage.record_turn(500, 1000);
    usage.save(&path).unwrap();

    let mut loaded = AccumulatedTokens::load(&path).unwrap();
    loaded.reset();
    loaded.save(&path).unwrap();

    assert_eq!(
        AccumulatedTokens::load(&path).unwrap(),
        AccumulatedTokens::default()
    );
}

/// The budget warns before the turn that would cross the limit is sent.
#[test]
fn test_budget_warns_before_limit() {
    let budget = TokenBudget::new(5000, 0.8);
    let tracker = UsageTracker::new();
    let turn = [Attachment::image("photo.jpg", None, None)];

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let breakdown = compute_breakdown("", &turn);
        statuses.push(budget.check(&tracker.snapshot(), &breakdown));
        tracker.record_breakdown(&breakdown);
    }

    // each turn projects 825 + 1650 = 2475 tokens
    assert!(matches!(statuses[0], BudgetStatus::Ok { remaining: 2525 }));
    assert!(matches!(statuses[1], BudgetStatus::Warning { remaining: 50, .. }));
    assert!(matches!(
        statuses[2],
        BudgetStatus::Exceeded {
            projected: 7425,
            overage: 2425
        }
    ));
}
