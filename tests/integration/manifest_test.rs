//! Integration tests for attachment manifests from the upload pipeline.

use crate::common::TestContext;
use tokmeter::tokens::text::count_text_tokens;
use tokmeter::types::parse_manifest;
use tokmeter::{compute_breakdown, Estimator, EstimatorConfig, FileType};

const MANIFEST: &str = r#"[
  {
    "url": "https://cdn.example.com/u/1/hero.png",
    "fileName": "hero.png",
    "fileType": "image",
    "status": "success",
    "width": 2048,
    "height": 2048
  },
  {
    "url": "https://cdn.example.com/u/1/logo.png",
    "fileName": "logo.png",
    "fileType": "image",
    "status": "success"
  },
  {
    "url": "https://cdn.example.com/u/1/brief.pdf",
    "fileName": "brief.pdf",
    "fileType": "document",
    "content": "Landing page for a coffee shop. Warm colors.",
    "status": "success"
  },
  {
    "url": "https://cdn.example.com/u/1/old.docx",
    "fileName": "old.docx",
    "fileType": "document",
    "status": "failed",
    "errorMessage": "document is encrypted"
  }
]"#;

#[test]
fn test_manifest_file_breakdown() {
    let ctx = TestContext::new();
    let path = ctx.create_file("attachments.json", MANIFEST);

    let json = std::fs::read_to_string(path).unwrap();
    let attachments = parse_manifest(&json).unwrap();
    assert_eq!(attachments.len(), 4);
    assert_eq!(attachments[3].error_message.as_deref(), Some("document is encrypted"));

    let breakdown = compute_breakdown("Make it responsive", &attachments);
    assert_eq!(breakdown.image_count, 2);
    assert_eq!(breakdown.image_tokens, 2805 + 825);
    assert_eq!(
        breakdown.document_tokens,
        count_text_tokens("Landing page for a coffee shop. Warm colors.")
    );
}

#[test]
fn test_config_file_changes_policy() {
    let ctx = TestContext::new();
    let config_path = ctx.create_file(
        "config.toml",
        "image_detail = \"low\"\noutput_multiplier = 1.0\n",
    );
    let config = EstimatorConfig::from_file(&config_path).unwrap();
    let estimator = Estimator::new(config);

    let attachments = parse_manifest(MANIFEST).unwrap();
    let breakdown = estimator.compute_breakdown("", &attachments);
    // low detail only applies when dimensions are known
    assert_eq!(breakdown.image_tokens, 85 + 825);
    assert_eq!(breakdown.estimated_output_tokens, breakdown.current_input_total);
}

#[test]
fn test_manifest_round_trips_through_serde() {
    let attachments = parse_manifest(MANIFEST).unwrap();
    let json = serde_json::to_string(&attachments).unwrap();
    assert!(json.contains("\"fileType\":\"document\""));
    assert_eq!(parse_manifest(&json).unwrap(), attachments);
    assert_eq!(attachments[0].file_type, FileType::Image);
}
