//! # Schema Validation
//!
//! Runtime validation of JSON documents against JSON Schema definitions
//! (Draft 2020-12).
//!
//! ## Contract
//!
//! Compilation and validation are separate failure domains. Compiling a
//! schema can fail and surfaces a [`SchemaError`]. Checking a document
//! against a [`CompiledSchema`] never fails: an invalid document is a normal
//! outcome, reported as a [`ValidationReport`] that carries every violation
//! found in one pass rather than stopping at the first.
//!
//! ## Schema Resolution
//!
//! Registered schemas use `$id` URIs of the form:
//!   `https://schemas.qfeed.dev/<name>`
//!
//! Cross-schema `$ref` URIs use the same pattern and are resolved locally
//! from the registry — never over the network. A `$ref` to a URI that no
//! registered schema answers to is a compile-time error; validation never
//! performs dynamic lookup.
//!
//! Internal `$ref`s of the form `#/$defs/<name>` are resolved by the
//! jsonschema crate natively.

use std::collections::HashMap;
use std::fmt;

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// URI prefix under which registered schemas are addressable for
/// cross-schema `$ref` resolution.
const SCHEMA_URI_PREFIX: &str = "https://schemas.qfeed.dev/";

/// Name under which the built-in quote-feed schema is registered.
pub const STOCK_QUOTES_SCHEMA_NAME: &str = "stock-quotes.schema.json";

/// The built-in quote-feed schema document, embedded at compile time.
pub const STOCK_QUOTES_SCHEMA: &str = include_str!("../schemas/stock-quotes.schema.json");

/// Local retriever that resolves `$ref` URIs to schemas held in the registry.
///
/// All references must resolve from the loaded registry; an unknown URI is
/// an error, which fails schema compilation rather than validation. This
/// also guarantees the jsonschema crate never makes a network request.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        // Direct lookup.
        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Try the trailing path segment under the canonical prefix, then as
        // a bare name, so relative references to registered schemas resolve.
        let name = uri_str.rsplit('/').next().unwrap_or(uri_str);
        let canonical = format!("{SCHEMA_URI_PREFIX}{name}");
        if let Some(value) = self.schemas_by_uri.get(&canonical) {
            return Ok(value.clone());
        }
        if let Some(value) = self.schemas_by_uri.get(name) {
            return Ok(value.clone());
        }

        Err(format!("schema reference '{uri_str}' does not resolve to a registered schema").into())
    }
}

/// Error raised while registering or compiling schemas.
///
/// Merely-invalid documents are not represented here — see
/// [`CompiledSchema::check`], which reports them as a [`ValidationReport`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text is not well-formed JSON.
    #[error("malformed schema '{name}': {reason}")]
    MalformedSchema {
        /// Name the schema was being registered under.
        name: String,
        /// Reason the text could not be parsed.
        reason: String,
    },

    /// A schema is already registered under this name.
    #[error("schema '{name}' is already registered")]
    DuplicateSchema {
        /// The conflicting name.
        name: String,
    },

    /// No schema is registered under the requested name.
    #[error("schema '{name}' is not registered")]
    SchemaNotFound {
        /// The requested name.
        name: String,
    },

    /// The schema could not be compiled — e.g. an unresolvable `$ref` or an
    /// internally inconsistent constraint definition.
    #[error("cannot compile schema '{name}': {reason}")]
    Compile {
        /// Name of the schema that failed to compile.
        name: String,
        /// Reason compilation failed.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the violation.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Outcome of checking one document against one compiled schema.
///
/// A report with zero violations means the document is valid; any violation
/// count above zero means invalid. There is no partial-success state.
/// Reports are plain values: checking the same document against the same
/// schema twice yields equal reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns true if the document conformed to the schema.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations, in document order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the report and returns the inner violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "  (valid)");
        }
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// An in-memory registry of named schema documents.
///
/// Mirrors the add-then-compile flow of the underlying engine: schemas are
/// registered under unique names, cross-schema `$ref` URIs resolve from the
/// registry, and [`compile`](Self::compile) produces an immutable
/// [`CompiledSchema`] that can be reused across many checks.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Map from schema name (e.g. "stock-quotes.schema.json") to parsed document.
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the built-in quote-feed schema,
    /// registered under [`STOCK_QUOTES_SCHEMA_NAME`].
    pub fn with_builtin() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.add_schema(STOCK_QUOTES_SCHEMA_NAME, STOCK_QUOTES_SCHEMA)?;
        Ok(registry)
    }

    /// Parse schema text and register it under `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MalformedSchema` if the text is not valid JSON,
    /// or `SchemaError::DuplicateSchema` if the name is already taken.
    pub fn add_schema(&mut self, name: &str, text: &str) -> Result<(), SchemaError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SchemaError::MalformedSchema {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        self.add_schema_value(name, value)
    }

    /// Register an already-parsed schema document under `name`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateSchema` if the name is already taken.
    pub fn add_schema_value(&mut self, name: &str, schema: Value) -> Result<(), SchemaError> {
        if self.schemas.contains_key(name) {
            return Err(SchemaError::DuplicateSchema {
                name: name.to_string(),
            });
        }
        self.schemas.insert(name.to_string(), schema);
        Ok(())
    }

    /// Returns the number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all registered schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a registered schema document by name.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Build `ValidationOptions` with every registered schema resolvable
    /// for cross-schema `$ref` URIs.
    ///
    /// Each schema is addressable under:
    /// - Canonical: `https://schemas.qfeed.dev/<name>`
    /// - The schema's own `$id` field, if present
    /// - Its bare registered name, for relative references
    ///
    /// The installed retriever answers only from this map; an unknown URI
    /// fails compilation.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (name, value) in &self.schemas {
            schemas_by_uri.insert(format!("{SCHEMA_URI_PREFIX}{name}"), value.clone());
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(name.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Compile the schema registered under `name`.
    ///
    /// Every `$ref` is resolved now — internal `#/$defs/...` fragments by
    /// the engine, cross-schema URIs from the registry — so the returned
    /// [`CompiledSchema`] is internally consistent and checks never perform
    /// dynamic lookup.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaNotFound` if `name` is not registered,
    /// or `SchemaError::Compile` if a reference cannot be resolved or the
    /// schema is otherwise uncompilable.
    pub fn compile(&self, name: &str) -> Result<CompiledSchema, SchemaError> {
        let schema_value = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::SchemaNotFound {
                name: name.to_string(),
            })?;

        let opts = self.build_options();
        let validator = opts.build(schema_value).map_err(|e| SchemaError::Compile {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(CompiledSchema {
            name: name.to_string(),
            validator,
        })
    }
}

/// A compiled, reusable validator for one registered schema.
///
/// Immutable after compilation and `Send + Sync` — one compiled schema can
/// serve many concurrent checks without locking.
pub struct CompiledSchema {
    /// Registered name of the source schema.
    name: String,
    /// The compiled constraint checker.
    validator: Validator,
}

impl CompiledSchema {
    /// The registered name of the schema this validator was compiled from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check a document against this schema.
    ///
    /// Walks the whole document and accumulates every violation rather than
    /// stopping at the first, so callers see all problems in one pass. An
    /// invalid document is a normal outcome — this method has no error path.
    pub fn check(&self, instance: &Value) -> ValidationReport {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        ValidationReport { violations }
    }

    /// Boolean shortcut: true if the document has zero violations.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
