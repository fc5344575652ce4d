//! Unit tests for error categorization.

use tokmeter::error::{EstimateError, EstimateResult};
use tokmeter::types::parse_manifest;
use tokmeter::usage::AccumulatedTokens;

#[test]
fn test_error_display_prefixes_module() {
    let cases = [
        EstimateError::tokenizer_unavailable("x"),
        EstimateError::usage_io("/tmp/u.json", "x"),
        EstimateError::usage_invariant("x"),
        EstimateError::attachment_manifest("x"),
    ];
    for err in cases {
        let prefix = format!("{}:", err.module());
        assert!(
            err.to_string().starts_with(&prefix),
            "{} should start with {}",
            err,
            prefix
        );
    }
}

#[test]
fn test_only_tokenizer_errors_are_recoverable() {
    assert!(EstimateError::tokenizer_unavailable("x").is_recoverable());
    assert!(!EstimateError::usage_io("p", "x").is_recoverable());
    assert!(!EstimateError::usage_invariant("x").is_recoverable());
}

#[test]
fn test_malformed_manifest() {
    let result: EstimateResult<_> = parse_manifest("not json");
    let err = result.unwrap_err();
    assert!(matches!(err, EstimateError::AttachmentManifest { .. }));
}

#[test]
fn test_missing_usage_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = AccumulatedTokens::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, EstimateError::UsageIo { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_converts_into_anyhow() {
    let err = EstimateError::usage_invariant("total mismatch");
    let any: anyhow::Error = err.into();
    assert!(any.to_string().contains("total mismatch"));
}
