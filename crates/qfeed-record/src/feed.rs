//! # Quote-Feed Record Shapes
//!
//! Statically shaped records for the quote-feed payload. The field set of
//! each record is fixed at definition time: decoding drops JSON fields with
//! no matching record field and leaves record fields with no matching JSON
//! field at their default value.
//!
//! Nested data whose presence the decoder does not guarantee is read
//! through `Option`-returning accessors, so "never populated" is an
//! observable `None` rather than a latent index panic.

use serde::{Deserialize, Serialize};

/// A full quote-feed payload: the root object of the feed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteFeed {
    /// Stock entries carried by this feed, in feed order. Empty when the
    /// source document omitted `data` entirely.
    #[serde(default)]
    pub data: Vec<StockEntry>,
}

impl QuoteFeed {
    /// Number of stock entries in the feed.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the feed carries no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The entry at `index`, or `None` if the feed has fewer entries.
    pub fn entry(&self, index: usize) -> Option<&StockEntry> {
        self.data.get(index)
    }
}

/// One stock entry in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Unique identifier for the stock.
    #[serde(default)]
    pub id: String,

    /// Opaque upstream key, carried through verbatim.
    #[serde(default)]
    pub some_key: String,

    /// Quotes for this stock, one per currency. Empty when the source
    /// document carried none, or carried them under a different key.
    /// Prefer [`quote_at`](Self::quote_at) over direct indexing.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl StockEntry {
    /// The quote at `index`, or `None` if fewer quotes were populated.
    pub fn quote_at(&self, index: usize) -> Option<&Quote> {
        self.quotes.get(index)
    }

    /// The first quote, or `None` if no quotes were populated.
    pub fn first_quote(&self) -> Option<&Quote> {
        self.quotes.first()
    }
}

/// A single price quotation in one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// ISO currency code the price is quoted in.
    #[serde(default)]
    pub currency: String,

    /// Quoted price. `None` when the source carried JSON `null` or omitted
    /// the field.
    #[serde(default)]
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feed_is_empty() {
        let feed = QuoteFeed::default();
        assert!(feed.is_empty());
        assert_eq!(feed.len(), 0);
        assert!(feed.entry(0).is_none());
    }

    #[test]
    fn test_accessors_never_fabricate_data() {
        let entry = StockEntry {
            id: "stock1".to_string(),
            some_key: "1".to_string(),
            quotes: Vec::new(),
        };
        assert!(entry.first_quote().is_none());
        assert!(entry.quote_at(0).is_none());
    }

    #[test]
    fn test_quote_at_in_bounds() {
        let entry = StockEntry {
            id: "stock1".to_string(),
            some_key: "1".to_string(),
            quotes: vec![Quote {
                currency: "USD".to_string(),
                price: Some(87.0),
            }],
        };
        let quote = entry.quote_at(0).unwrap();
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.price, Some(87.0));
        assert!(entry.quote_at(1).is_none());
    }
}
