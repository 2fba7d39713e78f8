// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Terraform module scenarios.
// Purpose: Provide scenario setup, artifact summaries, and expected values.
// Dependencies: system-tests, custodian-outputs, custodian-terraform
// ============================================================================

//! ## Overview
//! Shared helpers for the module scenario binaries.
//! Invariants:
//! - Every scenario that provisions infrastructure holds a destroy guard.
//! - Scenarios on the same module directory never overlap.
//! - Missing prerequisites produce a "skip" summary rather than a failure.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod expectations;
