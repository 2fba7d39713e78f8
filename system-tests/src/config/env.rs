// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for Terraform module scenarios.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: custodian-terraform
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. The Terraform wrapper itself
//! never reads the environment; [`SystemTestConfig::terraform_config`] is the
//! only bridge.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use custodian_terraform::TerraformConfig;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Root of the Terraform module repository.
    ModuleRoot,
    /// Terraform executable override.
    TerraformBinary,
    /// Optional run root override.
    RunRoot,
    /// Retry budget override (non-negative integer).
    MaxRetries,
    /// Delay between retries in seconds (positive integer).
    RetryDelaySeconds,
    /// JSON-lines audit log path; stderr when unset.
    AuditLog,
    /// Keep provisioned resources (`true`/`false` or `1`/`0`).
    KeepResources,
}

impl SystemTestEnv {
    /// Every key, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::ModuleRoot,
        Self::TerraformBinary,
        Self::RunRoot,
        Self::MaxRetries,
        Self::RetryDelaySeconds,
        Self::AuditLog,
        Self::KeepResources,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleRoot => "CUSTODIAN_LAMBDA_TEST_MODULE_ROOT",
            Self::TerraformBinary => "CUSTODIAN_LAMBDA_TEST_TERRAFORM_BINARY",
            Self::RunRoot => "CUSTODIAN_LAMBDA_TEST_RUN_ROOT",
            Self::MaxRetries => "CUSTODIAN_LAMBDA_TEST_MAX_RETRIES",
            Self::RetryDelaySeconds => "CUSTODIAN_LAMBDA_TEST_RETRY_DELAY_SEC",
            Self::AuditLog => "CUSTODIAN_LAMBDA_TEST_AUDIT_LOG",
            Self::KeepResources => "CUSTODIAN_LAMBDA_TEST_KEEP_RESOURCES",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Module repository root override.
    pub module_root: Option<PathBuf>,
    /// Terraform executable override.
    pub terraform_binary: Option<PathBuf>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Retry budget override.
    pub max_retries: Option<u32>,
    /// Retry delay override.
    pub retry_delay: Option<Duration>,
    /// Audit log path.
    pub audit_log: Option<PathBuf>,
    /// Skip guarded destroys so resources can be inspected.
    pub keep_resources: bool,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid delay or boolean value).
    pub fn load() -> Result<Self, String> {
        let path = |key: SystemTestEnv| -> Result<Option<PathBuf>, String> {
            Ok(read_env_nonempty(key.as_str())?.map(PathBuf::from))
        };
        let max_retries = read_env_nonempty(SystemTestEnv::MaxRetries.as_str())?
            .map(|value| parse_retries(SystemTestEnv::MaxRetries.as_str(), &value))
            .transpose()?;
        let retry_delay = read_env_nonempty(SystemTestEnv::RetryDelaySeconds.as_str())?
            .map(|value| parse_seconds(SystemTestEnv::RetryDelaySeconds.as_str(), &value))
            .transpose()?;
        let keep_resources = parse_bool_env(
            SystemTestEnv::KeepResources.as_str(),
            read_env_nonempty(SystemTestEnv::KeepResources.as_str())?,
        )?;
        Ok(Self {
            module_root: path(SystemTestEnv::ModuleRoot)?,
            terraform_binary: path(SystemTestEnv::TerraformBinary)?,
            run_root: path(SystemTestEnv::RunRoot)?,
            max_retries,
            retry_delay,
            audit_log: path(SystemTestEnv::AuditLog)?,
            keep_resources,
        })
    }

    /// Returns the module repository root, defaulting to `fallback`.
    #[must_use]
    pub fn module_root_or(&self, fallback: &Path) -> PathBuf {
        self.module_root.clone().unwrap_or_else(|| fallback.to_path_buf())
    }

    /// Builds the explicit wrapper configuration.
    #[must_use]
    pub fn terraform_config(&self) -> TerraformConfig {
        let defaults = TerraformConfig::default();
        TerraformConfig {
            binary: self.terraform_binary.clone().unwrap_or(defaults.binary),
            max_retries_override: self.max_retries,
            time_between_retries_override: self.retry_delay,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive number of seconds.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a retry count; zero disables retries.
///
/// # Errors
///
/// Returns an error when the value is not a non-negative integer.
fn parse_retries(name: &str, raw: &str) -> Result<u32, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be a non-negative integer"))
}

/// Parses a boolean environment variable with permissive defaults.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
