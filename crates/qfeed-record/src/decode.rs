//! # Strict Decoding
//!
//! Maps JSON text onto fixed record shapes with a deliberately weaker
//! contract than schema validation: what *is* mapped must be type-correct,
//! but nothing promises that required data is present.
//!
//! ## Contract
//!
//! - A JSON field with no matching record field is dropped silently.
//! - A record field with no matching JSON field keeps its default value.
//! - Malformed JSON text aborts the decode with [`DecodeError::Syntax`];
//!   no partial record is produced.
//! - A JSON value whose runtime type disagrees with a matched field's
//!   declared type aborts the decode with [`DecodeError::Type`].
//!
//! Reading an unpopulated nested path afterwards is a caller-side defect,
//! not a decode error — the record shapes expose `Option`-returning
//! accessors precisely so that condition is checkable.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

use crate::feed::QuoteFeed;

/// Error from a strict decode. Both variants abort the decode entirely.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    #[error("malformed JSON: {reason}")]
    Syntax {
        /// 1-based line of the offending text.
        line: usize,
        /// 1-based column of the offending text.
        column: usize,
        /// Parser description of the problem.
        reason: String,
    },

    /// A JSON value's runtime type disagrees with the declared type of the
    /// record field it maps to.
    #[error("type mismatch: {reason}")]
    Type {
        /// 1-based line of the offending value.
        line: usize,
        /// 1-based column of the offending value.
        column: usize,
        /// Description of the disagreement.
        reason: String,
    },
}

impl DecodeError {
    /// 1-based line the error was detected at.
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::Type { line, .. } => *line,
        }
    }

    /// 1-based column the error was detected at.
    pub fn column(&self) -> usize {
        match self {
            Self::Syntax { column, .. } | Self::Type { column, .. } => *column,
        }
    }

    fn from_json(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        let reason = err.to_string();
        match err.classify() {
            Category::Data => Self::Type { line, column, reason },
            _ => Self::Syntax { line, column, reason },
        }
    }
}

/// Decode JSON text into any strict record shape.
///
/// Single-pass and stateless: the call either returns a fully populated
/// record or fails, with no intermediate state exposed.
///
/// # Errors
///
/// Returns [`DecodeError::Syntax`] for malformed text and
/// [`DecodeError::Type`] for a type disagreement on a matched field.
/// Unknown JSON fields and absent record fields are not errors.
pub fn decode_strict<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    serde_json::from_str(text).map_err(DecodeError::from_json)
}

/// Decode a quote-feed document into [`QuoteFeed`].
///
/// # Errors
///
/// Same contract as [`decode_strict`].
pub fn decode_feed(text: &str) -> Result<QuoteFeed, DecodeError> {
    decode_strict(text)
}
