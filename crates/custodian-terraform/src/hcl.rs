// crates/custodian-terraform/src/hcl.rs
// ============================================================================
// Module: HCL Variable Rendering
// Description: Render JSON-typed input variables as `-var` arguments.
// Purpose: Pass strings, lists, and maps to Terraform in HCL literal syntax.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Terraform parses `-var key=value` values as HCL when the variable type is
//! not a plain string. Top-level strings are passed raw (a JSON policy document
//! stays a string); everything else is rendered as an HCL literal with nested
//! strings quoted.

use std::collections::BTreeMap;

use serde_json::Value;

/// Renders `key=value` for one input variable.
#[must_use]
pub fn format_var(key: &str, value: &Value) -> String {
    let rendered = match value {
        Value::String(text) => text.clone(),
        other => render_literal(other),
    };
    format!("{key}={rendered}")
}

/// Renders all variables as alternating `-var`, `key=value` arguments.
#[must_use]
pub fn var_args(vars: &BTreeMap<String, Value>) -> Vec<String> {
    vars.iter().flat_map(|(key, value)| ["-var".to_string(), format_var(key, value)]).collect()
}

/// Renders a nested value as an HCL literal.
fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        // JSON string escaping is a subset HCL accepts for quoted literals.
        Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_literal).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(entries) => {
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, item)| {
                    format!("{} = {}", Value::String(key.clone()), render_literal(item))
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}
