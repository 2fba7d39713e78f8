// crates/custodian-outputs/src/shape.rs
// ============================================================================
// Module: Value Shapes
// Description: Runtime shape classification for untyped output values.
// Purpose: Name the container/scalar shape of a value for diagnostics.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Terraform outputs arrive as untyped JSON. [`Shape`] classifies a value so
//! extraction code can pattern-match on structure and report the observed
//! shape when a fixture does not match the expected contract.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Runtime shape of an output value.
///
/// # Invariants
/// - Variants map one-to-one onto the [`Value`] variants.
/// - Labels returned by [`Shape::as_str`] are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// UTF-8 string scalar.
    String,
    /// Numeric scalar.
    Number,
    /// Boolean scalar.
    Bool,
    /// Ordered sequence of values.
    List,
    /// String-keyed mapping of values.
    Map,
    /// Explicit null.
    Null,
}

impl Shape {
    /// Classifies a value by its runtime structure.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Bool,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Map,
            Value::Null => Self::Null,
        }
    }

    /// Returns a stable label for the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Map => "map",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
