// system-tests/src/lib.rs
// ============================================================================
// Module: Custodian Lambda System Tests Library
// Description: Shared configuration for Terraform module scenarios.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: custodian-terraform
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and module detection used by the module scenario binaries
//! in `system-tests/tests`. Scenarios provision real AWS resources through the
//! Terraform CLI and are gated behind the `system-tests` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod module;
