//! Unit tests for usage report rendering.

use pretty_assertions::assert_eq;
use tokmeter::format::{format_token_count, render};
use tokmeter::usage::AccumulatedTokens;
use tokmeter::TokenBreakdown;

fn session_totals() -> AccumulatedTokens {
    let mut usage = AccumulatedTokens::default();
    usage.record_turn(4120, 8240);
    usage.record_turn(0, 1564);
    usage
}

#[test]
fn test_full_report_snapshot() {
    let breakdown = TokenBreakdown::from_parts(12, 1650, 3400, 2, 10_124);
    let output = render(&breakdown, &session_totals());

    insta::assert_snapshot!(output, @r"
    Token usage estimate

    [Current input]
      Text: 12 tokens
      Images: 1,650 tokens (2 images)
      Documents: 3,400 tokens
      Subtotal: 5,062 tokens

    [Accumulated]
      Input: 4,120 tokens
      Output: 9,804 tokens
      Total: 13,924 tokens
    ");
}

#[test]
fn test_empty_turn_report() {
    let output = render(&TokenBreakdown::default(), &AccumulatedTokens::default());
    let expected = "\
Token usage estimate

[Current input]
  Subtotal: 0 tokens

[Accumulated]
  Input: 0 tokens
  Output: 0 tokens
  Total: 0 tokens";
    assert_eq!(output, expected);
}

#[test]
fn test_documents_only_report() {
    let breakdown = TokenBreakdown::from_parts(0, 0, 250, 0, 500);
    let output = render(&breakdown, &AccumulatedTokens::default());
    let current: Vec<&str> = output
        .lines()
        .skip_while(|l| *l != "[Current input]")
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(
        current,
        vec!["[Current input]", "  Documents: 250 tokens", "  Subtotal: 250 tokens"]
    );
}

#[test]
fn test_format_token_count_boundaries() {
    assert_eq!(format_token_count(0), "0");
    assert_eq!(format_token_count(999), "999");
    assert_eq!(format_token_count(1_000), "1,000");
    assert_eq!(format_token_count(999_999), "999,999");
    assert_eq!(format_token_count(1_000_000), "1,000,000");
}
