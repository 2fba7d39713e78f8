// crates/custodian-terraform/src/options.rs
// ============================================================================
// Module: Terraform Options
// Description: Per-invocation options and process-wide wrapper configuration.
// Purpose: Describe which module to run, with which vars, and how to retry.
// Dependencies: serde_json, crate::error
// ============================================================================

//! ## Overview
//! [`TerraformOptions`] describes one module invocation: working directory,
//! input variables, targets, environment, and the retry table.
//! [`TerraformConfig`] carries settings that apply to every invocation (binary
//! path and retry overrides); it is passed in explicitly rather than read from
//! the environment so callers stay in control of process-wide state.
//!
//! Invariants:
//! - Retryable error patterns are matched as substrings of combined output.
//! - Option validation runs before any process is spawned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use crate::error::TerraformError;
use crate::error::TerraformResult;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Retry attempts applied by [`TerraformOptions::with_default_retryable_errors`].
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay between attempts applied by [`TerraformOptions::with_default_retryable_errors`].
pub const DEFAULT_TIME_BETWEEN_RETRIES: Duration = Duration::from_secs(5);

/// Transient Terraform failures worth retrying, as `(pattern, description)`.
pub const DEFAULT_RETRYABLE_ERRORS: &[(&str, &str)] = &[
    ("read: connection reset by peer", "Failed to reach helm charts repository."),
    ("transport is closing", "Failed to reach Kubernetes API."),
    ("unable to verify signature", "Failed to retrieve plugin due to transient network error."),
    ("unable to verify checksum", "Failed to retrieve plugin due to transient network error."),
    (
        "no provider exists with the given name",
        "Failed to retrieve plugin due to transient network error.",
    ),
    (
        "registry service is unreachable",
        "Failed to retrieve plugin due to transient network error.",
    ),
    ("Error installing provider", "Failed to retrieve plugin due to transient network error."),
    (
        "Failed to query available provider packages",
        "Failed to retrieve plugin due to transient network error.",
    ),
    (
        "timeout while waiting for plugin to start",
        "Failed to retrieve plugin due to transient network error.",
    ),
    (
        "timed out waiting for server handshake",
        "Failed to retrieve plugin due to transient network error.",
    ),
    (
        "could not query provider registry for",
        "Failed to retrieve plugin due to transient network error.",
    ),
    ("Provider produced inconsistent result after apply", "Provider eventual consistency error."),
];

// ============================================================================
// SECTION: Wrapper Configuration
// ============================================================================

/// Settings shared by every invocation of a [`crate::Terraform`] handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformConfig {
    /// Terraform executable (bare name resolved via `PATH`, or a path).
    pub binary: PathBuf,
    /// Overrides [`TerraformOptions::max_retries`] when set.
    pub max_retries_override: Option<u32>,
    /// Overrides [`TerraformOptions::time_between_retries`] when set.
    pub time_between_retries_override: Option<Duration>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("terraform"),
            max_retries_override: None,
            time_between_retries_override: None,
        }
    }
}

// ============================================================================
// SECTION: Invocation Options
// ============================================================================

/// Options for running Terraform against one module directory.
#[derive(Debug, Clone, PartialEq)]
pub struct TerraformOptions {
    /// Module working directory.
    pub terraform_dir: PathBuf,
    /// Input variables passed as `-var key=value`.
    pub vars: BTreeMap<String, Value>,
    /// Resource addresses passed as `-target=`.
    pub targets: Vec<String>,
    /// Extra environment for the Terraform process.
    pub env: BTreeMap<String, String>,
    /// Appends `-no-color` to lifecycle commands.
    pub no_color: bool,
    /// Substring patterns of retryable failures, with descriptions.
    pub retryable_errors: BTreeMap<String, String>,
    /// Extra attempts allowed after a retryable failure.
    pub max_retries: u32,
    /// Delay before each retry.
    pub time_between_retries: Duration,
}

impl TerraformOptions {
    /// Creates options for a module directory with no vars and no retries.
    #[must_use]
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            vars: BTreeMap::new(),
            targets: Vec::new(),
            env: BTreeMap::new(),
            no_color: false,
            retryable_errors: BTreeMap::new(),
            max_retries: 0,
            time_between_retries: Duration::ZERO,
        }
    }

    /// Installs the default retryable error table and retry budget.
    ///
    /// Patterns already present are kept.
    #[must_use]
    pub fn with_default_retryable_errors(mut self) -> Self {
        for (pattern, description) in DEFAULT_RETRYABLE_ERRORS {
            self.retryable_errors
                .entry((*pattern).to_string())
                .or_insert_with(|| (*description).to_string());
        }
        self.max_retries = DEFAULT_MAX_RETRIES;
        self.time_between_retries = DEFAULT_TIME_BETWEEN_RETRIES;
        self
    }

    /// Adds an input variable.
    #[must_use]
    pub fn var(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Adds a `-target` resource address.
    #[must_use]
    pub fn target(mut self, address: &str) -> Self {
        self.targets.push(address.to_string());
        self
    }

    /// Adds an environment variable for the Terraform process.
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets whether `-no-color` is passed.
    #[must_use]
    pub const fn no_color(mut self, enabled: bool) -> Self {
        self.no_color = enabled;
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn retries(mut self, max_retries: u32, time_between_retries: Duration) -> Self {
        self.max_retries = max_retries;
        self.time_between_retries = time_between_retries;
        self
    }

    /// Returns the module working directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.terraform_dir
    }

    /// Returns the description of the first retryable pattern found in `output`.
    #[must_use]
    pub fn retry_reason(&self, output: &str) -> Option<&str> {
        self.retryable_errors
            .iter()
            .find(|(pattern, _)| output.contains(pattern.as_str()))
            .map(|(_, description)| description.as_str())
    }

    /// Checks options before any process is spawned.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::InvalidOptions`] for an empty directory, empty
    /// variable names, or blank targets.
    pub fn validate(&self) -> TerraformResult<()> {
        if self.terraform_dir.as_os_str().is_empty() {
            return Err(TerraformError::InvalidOptions(
                "terraform_dir must not be empty".to_string(),
            ));
        }
        if let Some(key) = self.vars.keys().find(|key| key.trim().is_empty() || key.contains('=')) {
            return Err(TerraformError::InvalidOptions(format!("invalid variable name `{key}`")));
        }
        if self.targets.iter().any(|target| target.trim().is_empty()) {
            return Err(TerraformError::InvalidOptions("targets must not be blank".to_string()));
        }
        if self.retryable_errors.keys().any(String::is_empty) {
            return Err(TerraformError::InvalidOptions(
                "retryable error patterns must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
