// crates/custodian-terraform/src/error.rs
// ============================================================================
// Module: Terraform Errors
// Description: Error taxonomy for Terraform invocations.
// Purpose: Surface spawn, exit-status, and output failures with full context.
// Dependencies: custodian-outputs, thiserror
// ============================================================================

//! ## Overview
//! [`TerraformError::CommandFailed`] renders the combined stdout/stderr of the
//! failing command so negative scenarios can assert on the tool's own error
//! text (for example, failures raised by external data sources during plan).

use std::io;

use custodian_outputs::OutputError;
use thiserror::Error;

/// Errors raised while driving the Terraform CLI.
#[derive(Debug, Error)]
pub enum TerraformError {
    /// The Terraform process could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Terraform exited unsuccessfully.
    #[error("`{command}` failed with {}: {output}", describe_exit(.exit_code.as_ref()))]
    CommandFailed {
        /// Rendered command line.
        command: String,
        /// Process exit code; `None` when terminated by a signal.
        exit_code: Option<i32>,
        /// Combined stdout and stderr.
        output: String,
    },
    /// Outputs could not be read or reshaped.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Options are unusable before any command runs.
    #[error("invalid terraform options: {0}")]
    InvalidOptions(String),
}

impl TerraformError {
    /// Returns the combined command output for failed commands.
    #[must_use]
    pub fn command_output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed {
                output, ..
            } => Some(output),
            _ => None,
        }
    }
}

/// Describes an exit status for messages.
fn describe_exit(code: Option<&i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |code| format!("exit code {code}"),
    )
}

/// Result alias for Terraform operations.
pub type TerraformResult<T> = Result<T, TerraformError>;
