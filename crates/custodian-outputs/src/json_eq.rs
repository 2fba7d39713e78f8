// crates/custodian-outputs/src/json_eq.rs
// ============================================================================
// Module: JSON Equivalence
// Description: Structural comparison of JSON-encoded outputs.
// Purpose: Compare event patterns independent of key order and whitespace.
// Dependencies: serde_json, crate::error
// ============================================================================

//! ## Overview
//! Outputs such as `cloudwatch_event_pattern` are JSON documents encoded as
//! strings. Comparison parses both sides and compares the decoded values, so
//! object key order and formatting do not matter while list order does.
//! Numbers compare as `f64`, so `1` and `1.0` are equivalent.

use serde_json::Value;

use crate::error::OutputError;
use crate::error::OutputResult;

/// Parses a JSON string, labelling failures with the comparison side.
fn parse(label: &'static str, raw: &str) -> OutputResult<Value> {
    serde_json::from_str(raw).map_err(|err| OutputError::InvalidJson {
        label,
        message: err.to_string(),
    })
}

/// Returns true when both strings decode to the same JSON value.
///
/// # Errors
///
/// Returns [`OutputError::InvalidJson`] when either side fails to parse.
pub fn json_equivalent(expected: &str, actual: &str) -> OutputResult<bool> {
    let expected = parse("expected", expected)?;
    let actual = parse("actual", actual)?;
    Ok(values_equivalent(&expected, &actual))
}

/// Structural equality with numbers compared by their `f64` value.
fn values_equivalent(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(left, right)| values_equivalent(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right.get(key).is_some_and(|other| values_equivalent(value, other))
                })
        }
        _ => expected == actual,
    }
}
