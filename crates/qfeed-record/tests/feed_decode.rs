//! Integration test: strict decoding of the reference feed payload,
//! including the shape-mismatch hazard the `Option` accessors exist for.

use qfeed_record::{decode_feed, decode_strict, Quote};
use serde::Deserialize;

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
fn test_decode_reference_feed() {
    let feed = decode_feed(SAMPLE_FEED).unwrap();
    assert_eq!(feed.len(), 2, "expected 2 entries, got {}", feed.len());

    let first = feed.entry(0).unwrap();
    assert_eq!(first.id, "stock1");
    assert_eq!(first.some_key, "1");
    assert_eq!(first.first_quote().unwrap().currency, "USD");
    assert_eq!(first.first_quote().unwrap().price, Some(87.0));

    let second = feed.entry(1).unwrap();
    assert_eq!(second.id, "stock14");
    assert_eq!(second.some_key, "14");
}

/// A record shape whose quote field is named `quote` (singular) while the
/// payload keys it `quotes`. The mismatch is not a decode error: the JSON
/// field finds no record field and is dropped, and the record field finds
/// no JSON field and stays empty.
#[derive(Debug, Default, Deserialize)]
struct MisnamedEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct MisnamedFeed {
    #[serde(default)]
    data: Vec<MisnamedEntry>,
}

#[test]
fn test_misnamed_field_decodes_empty() {
    let feed: MisnamedFeed = decode_strict(SAMPLE_FEED).unwrap();
    assert_eq!(feed.data.len(), 2);
    assert_eq!(feed.data[0].id, "stock1");
    // The payload's "quotes" never reached the `quote` field.
    assert!(feed.data[0].quote.is_empty());
    // The safe read on the unpopulated field is a None, not a panic.
    assert!(feed.data[0].quote.first().is_none());
    assert!(feed.data[0].quote.get(0).is_none());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_unchecked_index_into_unpopulated_field_panics() {
    // The caller defect the accessors guard against: indexing into a
    // sequence field that was never populated.
    let feed: MisnamedFeed = decode_strict(SAMPLE_FEED).unwrap();
    let _ = feed.data[0].quote[0].currency.clone();
}

#[test]
fn test_extra_payload_fields_leave_no_trace() {
    let text = r#"
    {
      "data": [
        {
          "id": "stock1",
          "some_key": "1",
          "quotes": [{ "currency": "USD", "price": 87 }],
          "venue": "XNAS"
        }
      ],
      "generated_at": "2024-01-02T00:00:00Z"
    }
    "#;
    let feed = decode_feed(text).unwrap();
    assert_eq!(feed.len(), 1);

    let reencoded = serde_json::to_value(&feed).unwrap();
    assert_eq!(reencoded.get("generated_at"), None);
    assert_eq!(reencoded["data"][0].get("venue"), None);
}
