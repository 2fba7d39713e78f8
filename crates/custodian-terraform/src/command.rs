// crates/custodian-terraform/src/command.rs
// ============================================================================
// Module: Command Runner
// Description: Process invocation seam for the Terraform CLI.
// Purpose: Spawn Terraform with a fixed argv, working directory, and env.
// Dependencies: std::process, crate::error
// ============================================================================

//! ## Overview
//! [`CommandRunner`] is the only place a process is spawned. The production
//! [`ProcessRunner`] uses [`std::process::Command`]; tests substitute scripted
//! runners to exercise retry and lifecycle logic without a Terraform binary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use crate::error::TerraformError;
use crate::error::TerraformResult;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Fully resolved command line for one Terraform run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Executable to spawn.
    pub binary: PathBuf,
    /// Arguments, subcommand first.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: PathBuf,
    /// Extra environment variables.
    pub env: BTreeMap<String, String>,
}

impl CommandInvocation {
    /// Returns the subcommand (`init`, `apply`, ...), when present.
    #[must_use]
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Renders the command line for logs and error messages.
    #[must_use]
    pub fn display(&self) -> String {
        let mut rendered = self.binary.display().to_string();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout (lossy UTF-8).
    pub stdout: String,
    /// Captured stderr (lossy UTF-8).
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true for exit code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Returns stdout followed by stderr.
    #[must_use]
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Executes a Terraform command line.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Spawn`] when the process cannot be started.
    /// A non-zero exit is reported through [`CommandOutput`], not as an error.
    fn run(&self, invocation: &CommandInvocation) -> TerraformResult<CommandOutput>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &CommandInvocation) -> TerraformResult<CommandOutput> {
        let output = Command::new(&invocation.binary)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .envs(&invocation.env)
            .output()
            .map_err(|source| TerraformError::Spawn {
                command: invocation.display(),
                source,
            })?;
        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
