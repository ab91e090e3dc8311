//! # qfeed-record — Strict Typed Decoding of Quote-Feed Payloads
//!
//! The statically typed counterpart to schema validation: JSON text is
//! mapped onto fixed record shapes ([`QuoteFeed`], [`StockEntry`],
//! [`Quote`]) with strict field correspondence. Unknown JSON fields are
//! dropped silently, absent fields keep their defaults, and only malformed
//! text or a type mismatch on a matched field is an error.
//!
//! This contract is intentionally weaker than the validator's — it checks
//! that what *is* mapped is type-correct and makes no promise that required
//! data is present. Pair it with `qfeed-schema` when presence guarantees
//! matter; neither crate depends on the other.

pub mod decode;
pub mod feed;

pub use decode::{decode_feed, decode_strict, DecodeError};
pub use feed::{Quote, QuoteFeed, StockEntry};
