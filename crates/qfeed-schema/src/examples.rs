//! # Embedded-Example Auditing
//!
//! JSON Schema documents may carry `examples` annotations at any level.
//! This module extracts those annotations and checks that the examples a
//! schema advertises actually conform to the schema itself — a schema whose
//! own examples fail validation is misleading documentation for every
//! consumer of the feed contract.
//!
//! Extraction is annotation-aware: a *property named* `examples` (a key
//! under `properties`) is schema structure, not an annotation, and the
//! contents of instance-data keywords (`examples`, `default`, `const`,
//! `enum`) are data, so the walker never descends into them looking for
//! more annotations.

use serde_json::Value;

use crate::validate::{SchemaError, SchemaRegistry, ValidationReport};

/// Keywords whose contents are instance data, not schema nodes.
const DATA_KEYWORDS: &[&str] = &["examples", "default", "const", "enum"];

/// Keywords whose object values map *names* to schemas, so their keys must
/// not be read as schema keywords.
const NAME_MAP_KEYWORDS: &[&str] = &["properties", "patternProperties", "$defs", "definitions"];

/// One `examples` annotation entry found in a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedExample {
    /// JSON Pointer to the example within the schema document
    /// (e.g. `/$defs/quote/examples/0`).
    pub schema_path: String,
    /// The example value itself.
    pub value: Value,
}

/// Collect every `examples` annotation entry in a schema document.
///
/// Entries are returned in document order, one per element of each
/// `examples` array, each with the JSON Pointer of its location.
pub fn embedded_examples(schema: &Value) -> Vec<EmbeddedExample> {
    let mut found = Vec::new();
    walk(schema, "", false, &mut found);
    found
}

fn walk(node: &Value, path: &str, in_name_map: bool, found: &mut Vec<EmbeddedExample>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = format!("{path}/{}", escape_pointer_token(key));

                if !in_name_map && DATA_KEYWORDS.contains(&key.as_str()) {
                    if key == "examples" {
                        if let Value::Array(items) = child {
                            for (i, item) in items.iter().enumerate() {
                                found.push(EmbeddedExample {
                                    schema_path: format!("{child_path}/{i}"),
                                    value: item.clone(),
                                });
                            }
                        }
                    }
                    // Instance data: do not descend.
                    continue;
                }

                let child_is_name_map =
                    !in_name_map && NAME_MAP_KEYWORDS.contains(&key.as_str());
                walk(child, &child_path, child_is_name_map, found);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &format!("{path}/{i}"), false, found);
            }
        }
        _ => {}
    }
}

/// Escape a single JSON Pointer reference token (RFC 6901).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// A root-level example that fails validation against its own schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFinding {
    /// Index of the example within the schema's root `examples` array.
    pub index: usize,
    /// The violations the example produced.
    pub report: ValidationReport,
}

impl std::fmt::Display for ExampleFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  /examples/{}:", self.index)?;
        write!(f, "{}", self.report)
    }
}

/// Validate every root-level example of a registered schema against the
/// schema itself.
///
/// Returns one [`ExampleFinding`] per failing example; an empty list means
/// every advertised example conforms. Nested `examples` annotations target
/// sub-schemas and are not checked here — use [`embedded_examples`] to
/// enumerate them.
///
/// # Errors
///
/// Returns `SchemaError::SchemaNotFound` if `name` is not registered, or a
/// compile error if the schema itself cannot be compiled.
pub fn audit_examples(
    registry: &SchemaRegistry,
    name: &str,
) -> Result<Vec<ExampleFinding>, SchemaError> {
    let schema = registry
        .get_schema(name)
        .ok_or_else(|| SchemaError::SchemaNotFound {
            name: name.to_string(),
        })?;
    let compiled = registry.compile(name)?;

    let mut findings = Vec::new();
    if let Some(examples) = schema.get("examples").and_then(Value::as_array) {
        for (index, example) in examples.iter().enumerate() {
            let report = compiled.check(example);
            if !report.is_valid() {
                findings.push(ExampleFinding { index, report });
            }
        }
    }
    Ok(findings)
}
