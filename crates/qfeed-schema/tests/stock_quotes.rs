//! Integration test: the shipped quote-feed schema, end to end.
//!
//! Compiles the built-in schema, validates realistic feed payloads against
//! it, and audits the schema's own embedded examples.

use qfeed_schema::{audit_examples, SchemaRegistry, STOCK_QUOTES_SCHEMA_NAME};
use serde_json::json;

/// The reference two-entry feed payload.
const SAMPLE_FEED: &str = r#"
{
"data": [
    {
      "id": "stock1",
      "some_key": "1",
      "quotes": [{
          "currency": "USD",
          "price": 87
      }]
    },
    {
      "id": "stock14",
      "some_key": "14",
      "quotes": [{
          "currency": "USD",
          "price": 87
      }]
    }
  ]
}
"#;

#[test]
fn test_sample_feed_validates() {
    let registry = SchemaRegistry::with_builtin().expect("built-in schema must register");
    let compiled = registry
        .compile(STOCK_QUOTES_SCHEMA_NAME)
        .expect("built-in schema must compile");

    let feed: serde_json::Value = serde_json::from_str(SAMPLE_FEED).unwrap();
    let report = compiled.check(&feed);
    assert!(
        report.is_valid(),
        "reference payload failed validation:\n{report}"
    );
}

#[test]
fn test_compiled_schema_reusable_across_documents() {
    let registry = SchemaRegistry::with_builtin().unwrap();
    let compiled = registry.compile(STOCK_QUOTES_SCHEMA_NAME).unwrap();

    let good: serde_json::Value = serde_json::from_str(SAMPLE_FEED).unwrap();
    let bad = json!({ "data": [{ "id": "x" }] });
    let worse = json!({ "not_data": [] });

    // One compiled schema, many checks; results depend only on the input.
    assert!(compiled.check(&good).is_valid());
    assert!(!compiled.check(&bad).is_valid());
    assert!(!compiled.check(&worse).is_valid());
    assert!(compiled.check(&good).is_valid());
}

#[test]
fn test_missing_top_level_data_located_at_root() {
    let registry = SchemaRegistry::with_builtin().unwrap();
    let compiled = registry.compile(STOCK_QUOTES_SCHEMA_NAME).unwrap();

    let report = compiled.check(&json!({}));
    assert!(!report.is_valid());
    let v = &report.violations()[0];
    assert!(v.instance_path.is_empty(), "missing 'data' is a root violation");
    assert!(v.message.contains("data"), "got: {}", v.message);
}

#[test]
fn test_builtin_examples_audit_clean() {
    let registry = SchemaRegistry::with_builtin().unwrap();
    let findings = audit_examples(&registry, STOCK_QUOTES_SCHEMA_NAME).unwrap();
    let rendered: Vec<String> = findings.iter().map(ToString::to_string).collect();
    assert!(
        findings.is_empty(),
        "shipped schema advertises nonconforming examples:\n{}",
        rendered.join("\n")
    );
}

#[test]
fn test_compiled_schema_shared_across_threads() {
    let registry = SchemaRegistry::with_builtin().unwrap();
    let compiled = registry.compile(STOCK_QUOTES_SCHEMA_NAME).unwrap();
    let feed: serde_json::Value = serde_json::from_str(SAMPLE_FEED).unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert!(compiled.check(&feed).is_valid());
            });
        }
    });
}
