// crates/custodian-outputs/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared builders for custodian-outputs integration tests.
// Purpose: Build output bags and arbitrary fixtures for property tests.
// Dependencies: custodian-outputs, proptest, serde_json
// ============================================================================

//! ## Overview
//! Builders for output bags plus proptest strategies for map-shaped outputs.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;

use custodian_outputs::OutputBag;
use proptest::prelude::*;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Bag Builders
// ============================================================================

/// Builds a bag holding a single named output.
pub fn single_output(name: &str, value: Value) -> OutputBag {
    [(name.to_string(), value)].into_iter().collect()
}

/// Wraps a string-list map as a JSON object value.
pub fn list_map_value(source: &BTreeMap<String, Vec<String>>) -> Value {
    let map: Map<String, Value> = source
        .iter()
        .map(|(key, items)| {
            (key.clone(), Value::Array(items.iter().cloned().map(Value::String).collect()))
        })
        .collect();
    Value::Object(map)
}

// ============================================================================
// SECTION: Strategies
// ============================================================================

/// Arbitrary scalar or shallow container value.
pub fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9-]{0,12}".prop_map(Value::String),
        prop::collection::vec("[a-z]{1,4}".prop_map(Value::String), 0..4).prop_map(Value::Array),
    ]
}

/// Arbitrary map output with mixed value shapes.
pub fn any_map_output() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[ -~]{0,16}", any_value(), 0..24)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Arbitrary well-formed `map(list(string))` source.
pub fn any_list_map() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        "[A-Za-z][A-Za-z0-9_-]{0,12}",
        prop::collection::vec("[a-z]{2}-[a-z]{4,9}-[1-3]", 0..6),
        0..12,
    )
}
