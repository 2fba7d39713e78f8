// crates/custodian-outputs/src/lib.rs
// ============================================================================
// Module: Custodian Outputs Library
// Description: Typed views over Terraform output bags.
// Purpose: Normalize weakly-typed provisioning outputs for assertions.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Terraform reports outputs as untyped JSON. This crate holds the snapshot
//! ([`OutputBag`]) and the pure extractors that reshape it into
//! order-independent, strongly-typed structures:
//! - [`extract_sorted_keys`] for key-set comparison of map outputs.
//! - [`normalize_list_map`] for `map(list(string))` outputs.
//! - [`output_string`], [`output_list`], [`output_map`] for literal checks.
//!
//! Invariants:
//! - Extraction never mutates the bag and never performs I/O.
//! - Failures are all-or-nothing; no partial structure is ever returned.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bag;
pub mod error;
pub mod extract;
pub mod json_eq;
pub mod render;
pub mod shape;
pub mod vocabulary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bag::OutputBag;
pub use error::OutputError;
pub use error::OutputResult;
pub use extract::SortedKeyList;
pub use extract::StringListMap;
pub use extract::extract_sorted_keys;
pub use extract::normalize_list_map;
pub use json_eq::json_equivalent;
pub use render::output_list;
pub use render::output_map;
pub use render::output_string;
pub use render::render_value;
pub use shape::Shape;
pub use vocabulary::ConfigRuleFrequency;
pub use vocabulary::PolicyMode;
