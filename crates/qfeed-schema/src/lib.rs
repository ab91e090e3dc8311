//! # qfeed-schema — Quote-Feed Schema Validation
//!
//! Runtime JSON Schema validation for inbound quote-feed payloads.
//!
//! ## Validation (`validate`)
//!
//! The [`validate`] module provides [`SchemaRegistry`], an in-memory store
//! of named schema documents with local `$ref` resolution, and
//! [`CompiledSchema`], an immutable compiled validator reusable across many
//! checks. Checking a document produces a [`ValidationReport`] carrying
//! every violation found in one pass — an invalid document is a normal
//! outcome, not an error.
//!
//! The built-in feed schema ships with the crate and is registered by
//! [`SchemaRegistry::with_builtin`].
//!
//! ## Example Auditing (`examples`)
//!
//! The [`examples`] module extracts the `examples` annotations a schema
//! document carries and verifies that the root-level ones conform to the
//! schema itself.
//!
//! ## Crate Policy
//!
//! - No file or network I/O: schemas are registered from in-memory text and
//!   all `$ref` URIs resolve from the registry.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - A compiled schema is `Send + Sync`; concurrent checks need no locking.

pub mod examples;
pub mod validate;

pub use examples::{audit_examples, embedded_examples, EmbeddedExample, ExampleFinding};
pub use validate::{
    CompiledSchema, SchemaError, SchemaRegistry, ValidationReport, Violation,
    STOCK_QUOTES_SCHEMA, STOCK_QUOTES_SCHEMA_NAME,
};
