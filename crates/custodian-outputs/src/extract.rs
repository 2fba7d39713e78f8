// crates/custodian-outputs/src/extract.rs
// ============================================================================
// Module: Output Extractors
// Description: Order-independent reshaping of map-valued outputs.
// Purpose: Turn weakly-typed outputs into sorted key lists and string-list maps.
// Dependencies: serde_json, crate::{bag, error, shape}
// ============================================================================

//! ## Overview
//! Two extractors normalize map-valued outputs for assertions:
//! - [`extract_sorted_keys`] returns the key set of a map output, sorted.
//! - [`normalize_list_map`] converts `map(list(string))` outputs into a
//!   [`StringListMap`], validating every element.
//!
//! Invariants:
//! - Both are pure over the bag snapshot and safe to call concurrently.
//! - Failures abort the whole extraction; no partial result is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::bag::OutputBag;
use crate::error::OutputError;
use crate::error::OutputResult;
use crate::shape::Shape;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Keys of a map output, sorted ascending by byte order.
pub type SortedKeyList = Vec<String>;

/// Map output whose values are ordered string lists.
///
/// Per-key element order follows the source list. Key iteration order is an
/// artifact of [`BTreeMap`] and carries no meaning.
pub type StringListMap = BTreeMap<String, Vec<String>>;

// ============================================================================
// SECTION: Key Set Extraction
// ============================================================================

/// Returns the sorted keys of a map-shaped output.
///
/// Values are never inspected.
///
/// # Errors
///
/// Returns [`OutputError::NotFoundOrWrongShape`] when the output is absent or
/// not a map.
pub fn extract_sorted_keys(bag: &OutputBag, output_name: &str) -> OutputResult<SortedKeyList> {
    let map = bag.require_map(output_name)?;
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort_unstable();
    Ok(keys)
}

// ============================================================================
// SECTION: List Map Normalization
// ============================================================================

/// Converts a `map(list(string))` output into a [`StringListMap`].
///
/// # Errors
///
/// Returns [`OutputError::NotFoundOrWrongShape`] when the output is absent or
/// not a map, and [`OutputError::ElementTypeMismatch`] for the first value that
/// is not a list or list element that is not a string.
pub fn normalize_list_map(bag: &OutputBag, output_name: &str) -> OutputResult<StringListMap> {
    let map = bag.require_map(output_name)?;
    let mut result = StringListMap::new();
    for (key, value) in map {
        let strings = string_list(output_name, key, value)?;
        result.insert(key.clone(), strings);
    }
    Ok(result)
}

/// Validates one map value as a list of strings, preserving element order.
fn string_list(output_name: &str, key: &str, value: &Value) -> OutputResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(OutputError::ElementTypeMismatch {
            output: output_name.to_string(),
            key: key.to_string(),
            index: None,
            expected: Shape::List,
            found: Shape::of(value),
        });
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(text) => Ok(text.clone()),
            other => Err(OutputError::ElementTypeMismatch {
                output: output_name.to_string(),
                key: key.to_string(),
                index: Some(index),
                expected: Shape::String,
                found: Shape::of(other),
            }),
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
