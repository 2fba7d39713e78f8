// crates/custodian-outputs/src/render.rs
// ============================================================================
// Module: Output Rendering
// Description: String views over scalar, list, and map outputs.
// Purpose: Back literal-equality and substring assertions on outputs.
// Dependencies: serde_json, crate::{bag, error, shape}
// ============================================================================

//! ## Overview
//! Scenarios mostly compare outputs against literal strings. These accessors
//! render an output (or each element of a list/map output) as text:
//! strings are returned raw, numbers and booleans use their literal form,
//! `null` is empty, and nested containers become compact JSON so substring
//! checks still find identifiers buried inside them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::bag::OutputBag;
use crate::error::OutputResult;
use crate::shape::Shape;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a single value as assertion text.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

/// Returns an output rendered as text.
///
/// # Errors
///
/// Returns [`crate::OutputError::NotFoundOrWrongShape`] when the output is absent.
pub fn output_string(bag: &OutputBag, name: &str) -> OutputResult<String> {
    bag.require(name, Shape::String).map(render_value)
}

/// Returns a list output with each element rendered as text.
///
/// # Errors
///
/// Returns [`crate::OutputError::NotFoundOrWrongShape`] when the output is
/// absent or not a list.
pub fn output_list(bag: &OutputBag, name: &str) -> OutputResult<Vec<String>> {
    Ok(bag.require_list(name)?.iter().map(render_value).collect())
}

/// Returns a map output with each value rendered as text.
///
/// # Errors
///
/// Returns [`crate::OutputError::NotFoundOrWrongShape`] when the output is
/// absent or not a map.
pub fn output_map(bag: &OutputBag, name: &str) -> OutputResult<BTreeMap<String, String>> {
    Ok(bag
        .require_map(name)?
        .iter()
        .map(|(key, value)| (key.clone(), render_value(value)))
        .collect())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
