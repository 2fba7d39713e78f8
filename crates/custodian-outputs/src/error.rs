// crates/custodian-outputs/src/error.rs
// ============================================================================
// Module: Output Errors
// Description: Error taxonomy for output extraction and normalization.
// Purpose: Report missing outputs and type-confused fixtures with location.
// Dependencies: thiserror, crate::shape
// ============================================================================

//! ## Overview
//! Every extraction in this crate is all-or-nothing. A failure carries the
//! output name and, where it applies, the offending key and list index so a
//! malformed fixture can be located without re-running the provisioning step.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::shape::Shape;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading or reshaping an output bag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// Requested output is absent or not of the expected container shape.
    #[error(
        "output `{output}` not found or wrong shape: expected {expected}, found {}",
        .found.map_or("nothing", Shape::as_str)
    )]
    NotFoundOrWrongShape {
        /// Requested output name.
        output: String,
        /// Shape the caller required.
        expected: Shape,
        /// Observed shape, `None` when the output is absent.
        found: Option<Shape>,
    },
    /// A value inside a supposedly homogeneous container failed its type check.
    #[error(
        "output `{output}` key `{key}`{}: expected {expected}, found {found}",
        .index.map(|index| format!(" index {index}")).unwrap_or_default()
    )]
    ElementTypeMismatch {
        /// Output the container belongs to.
        output: String,
        /// Map key whose value failed the check.
        key: String,
        /// List position of the offending element, when the list itself was valid.
        index: Option<usize>,
        /// Shape the caller required.
        expected: Shape,
        /// Observed shape.
        found: Shape,
    },
    /// The output document could not be interpreted as an output bag.
    #[error("invalid output document: {0}")]
    InvalidDocument(String),
    /// A JSON string supplied for comparison failed to parse.
    #[error("invalid json for {label}: {message}")]
    InvalidJson {
        /// Which side of the comparison failed.
        label: &'static str,
        /// Parser diagnostic.
        message: String,
    },
    /// A `mode_type` value is not a known policy execution mode.
    #[error("unknown policy mode: {0}")]
    UnknownPolicyMode(String),
    /// A config rule frequency is not an accepted AWS Config value.
    #[error("unknown config rule execution frequency: {0}")]
    UnknownFrequency(String),
}

impl OutputError {
    /// Builds a [`OutputError::NotFoundOrWrongShape`] for an output lookup.
    #[must_use]
    pub fn not_found_or_wrong_shape(output: &str, expected: Shape, found: Option<Shape>) -> Self {
        Self::NotFoundOrWrongShape {
            output: output.to_string(),
            expected,
            found,
        }
    }

    /// Returns the output name the error refers to, when there is one.
    #[must_use]
    pub fn output_name(&self) -> Option<&str> {
        match self {
            Self::NotFoundOrWrongShape {
                output, ..
            }
            | Self::ElementTypeMismatch {
                output, ..
            } => Some(output),
            _ => None,
        }
    }
}

/// Result alias for output extraction.
pub type OutputResult<T> = Result<T, OutputError>;

// ============================================================================
// SECTION: Tests
// ============================================================================
