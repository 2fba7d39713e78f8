// crates/custodian-outputs/src/bag.rs
// ============================================================================
// Module: Output Bag
// Description: Snapshot of every named output produced by an apply.
// Purpose: Hold untyped Terraform outputs for read-only extraction.
// Dependencies: serde, serde_json, crate::{error, shape}
// ============================================================================

//! ## Overview
//! An [`OutputBag`] is the snapshot returned by `terraform output -json`,
//! reduced to `name -> value`. It is immutable once built; every extractor
//! reads from it without mutation, so a single bag can back any number of
//! assertions, including from concurrent scenario threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

use crate::error::OutputError;
use crate::error::OutputResult;
use crate::shape::Shape;

// ============================================================================
// SECTION: Output Bag
// ============================================================================

/// Snapshot of named outputs.
///
/// # Invariants
/// - Names are unique (map keys).
/// - The bag is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputBag {
    /// Output values keyed by output name.
    values: BTreeMap<String, Value>,
}

impl OutputBag {
    /// Wraps an already-decoded `name -> value` mapping.
    #[must_use]
    pub const fn from_values(values: BTreeMap<String, Value>) -> Self {
        Self {
            values,
        }
    }

    /// Parses the document printed by `terraform output -json`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::InvalidDocument`] when the text is not JSON, the
    /// top level is not an object, or an entry has no `value` field.
    pub fn from_terraform_json(raw: &str) -> OutputResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_json::from_str(trimmed)
            .map_err(|err| OutputError::InvalidDocument(err.to_string()))?;
        let Value::Object(entries) = document else {
            return Err(OutputError::InvalidDocument(format!(
                "expected top-level map, found {}",
                Shape::of(&document)
            )));
        };
        Self::from_entries(entries)
    }

    /// Decodes each `{ sensitive, type, value }` entry, keeping only `value`.
    fn from_entries(entries: Map<String, Value>) -> OutputResult<Self> {
        let mut values = BTreeMap::new();
        for (name, entry) in entries {
            let Value::Object(mut fields) = entry else {
                return Err(OutputError::InvalidDocument(format!(
                    "output `{name}` is not an object"
                )));
            };
            let value = fields.remove("value").ok_or_else(|| {
                OutputError::InvalidDocument(format!("output `{name}` has no value"))
            })?;
            values.insert(name, value);
        }
        Ok(Self {
            values,
        })
    }

    /// Returns the raw value of an output.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns output names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the bag holds no outputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves an output that must be map-shaped.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NotFoundOrWrongShape`] when the output is absent
    /// or is not a map.
    pub fn require_map(&self, name: &str) -> OutputResult<&Map<String, Value>> {
        match self.values.get(name) {
            Some(Value::Object(map)) => Ok(map),
            other => Err(OutputError::not_found_or_wrong_shape(
                name,
                Shape::Map,
                other.map(Shape::of),
            )),
        }
    }

    /// Resolves an output that must be list-shaped.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NotFoundOrWrongShape`] when the output is absent
    /// or is not a list.
    pub fn require_list(&self, name: &str) -> OutputResult<&[Value]> {
        match self.values.get(name) {
            Some(Value::Array(items)) => Ok(items),
            other => Err(OutputError::not_found_or_wrong_shape(
                name,
                Shape::List,
                other.map(Shape::of),
            )),
        }
    }

    /// Resolves an output that must be present, whatever its shape.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NotFoundOrWrongShape`] when the output is absent.
    pub fn require(&self, name: &str, expected: Shape) -> OutputResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| OutputError::not_found_or_wrong_shape(name, expected, None))
    }
}

impl FromIterator<(String, Value)> for OutputBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
