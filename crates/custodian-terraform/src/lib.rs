// crates/custodian-terraform/src/lib.rs
// ============================================================================
// Module: Custodian Terraform
// Description: Terraform CLI wrapper for module integration scenarios.
// Purpose: Run init/apply/plan/destroy/output with retries and scoped cleanup.
// Dependencies: custodian-outputs, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate drives the Terraform CLI against one module directory at a time.
//! [`Terraform`] applies a substring-matched retry policy, reads outputs into an
//! [`custodian_outputs::OutputBag`], and hands out [`DestroyGuard`]s that
//! release infrastructure when a scenario ends, successfully or not.
//! Invariants:
//! - Processes are only spawned through a [`CommandRunner`].
//! - Every attempt is reported to a [`TerraformAuditSink`].
//! - Process-wide environment is never read; configuration is explicit.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod command;
pub mod error;
pub mod guard;
pub mod hcl;
pub mod options;
pub mod terraform;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditOutcome;
pub use audit::CommandAuditEvent;
pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::TerraformAuditSink;
pub use command::CommandInvocation;
pub use command::CommandOutput;
pub use command::CommandRunner;
pub use command::ProcessRunner;
pub use error::TerraformError;
pub use error::TerraformResult;
pub use guard::DestroyGuard;
pub use guard::ModuleLock;
pub use guard::module_lock;
pub use options::DEFAULT_MAX_RETRIES;
pub use options::DEFAULT_RETRYABLE_ERRORS;
pub use options::DEFAULT_TIME_BETWEEN_RETRIES;
pub use options::TerraformConfig;
pub use options::TerraformOptions;
pub use terraform::Terraform;
