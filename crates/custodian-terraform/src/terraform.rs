// crates/custodian-terraform/src/terraform.rs
// ============================================================================
// Module: Terraform Lifecycle
// Description: init/plan/apply/destroy/output operations over the CLI.
// Purpose: Drive one module through its lifecycle with retries and auditing.
// Dependencies: custodian-outputs, crate::{audit, command, error, guard, hcl, options}
// ============================================================================

//! ## Overview
//! [`Terraform`] binds a [`TerraformConfig`], a [`CommandRunner`], and a
//! [`TerraformAuditSink`]. Each lifecycle operation builds an argv from
//! [`TerraformOptions`], runs it, and applies the retry policy:
//! - success returns immediately;
//! - a failure whose output matches a retryable pattern is retried after the
//!   configured delay until the retry budget is spent;
//! - any other failure is returned at once.
//!
//! Output accessors read `terraform output -json` into an [`OutputBag`] and
//! delegate to the pure extractors in `custodian-outputs`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use custodian_outputs::OutputBag;
use custodian_outputs::SortedKeyList;
use custodian_outputs::StringListMap;
use custodian_outputs::extract_sorted_keys;
use custodian_outputs::normalize_list_map;
use custodian_outputs::output_list;
use custodian_outputs::output_map;
use custodian_outputs::output_string;

use crate::audit::AuditOutcome;
use crate::audit::CommandAuditEvent;
use crate::audit::NoopAuditSink;
use crate::audit::TerraformAuditSink;
use crate::command::CommandInvocation;
use crate::command::CommandOutput;
use crate::command::CommandRunner;
use crate::command::ProcessRunner;
use crate::error::TerraformError;
use crate::error::TerraformResult;
use crate::guard::DestroyGuard;
use crate::hcl::var_args;
use crate::options::TerraformConfig;
use crate::options::TerraformOptions;

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Terraform CLI handle.
///
/// # Invariants
/// - Cheap to clone; clones share the runner and audit sink.
/// - Never reads process-wide environment; all settings come from
///   [`TerraformConfig`] and [`TerraformOptions`].
#[derive(Clone)]
pub struct Terraform {
    /// Process-wide settings.
    config: TerraformConfig,
    /// Process spawner.
    runner: Arc<dyn CommandRunner>,
    /// Audit event destination.
    audit: Arc<dyn TerraformAuditSink>,
}

impl Terraform {
    /// Creates a handle that spawns real processes and discards audit events.
    #[must_use]
    pub fn new(config: TerraformConfig) -> Self {
        Self::with_parts(config, Arc::new(ProcessRunner), Arc::new(NoopAuditSink))
    }

    /// Creates a handle from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: TerraformConfig,
        runner: Arc<dyn CommandRunner>,
        audit: Arc<dyn TerraformAuditSink>,
    ) -> Self {
        Self {
            config,
            runner,
            audit,
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn TerraformAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the wrapper configuration.
    #[must_use]
    pub const fn config(&self) -> &TerraformConfig {
        &self.config
    }

    /// Returns the audit sink shared by this handle.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn TerraformAuditSink> {
        &self.audit
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Runs `terraform init`.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError`] when options are invalid, the process cannot
    /// start, or Terraform exits non-zero after retries.
    pub fn init(&self, options: &TerraformOptions) -> TerraformResult<String> {
        let mut args = strings(&["init", "-upgrade=false", "-input=false"]);
        push_no_color(&mut args, options);
        self.run(options, args).map(|output| output.stdout)
    }

    /// Runs `terraform apply` with vars and targets.
    ///
    /// # Errors
    ///
    /// See [`Terraform::init`].
    pub fn apply(&self, options: &TerraformOptions) -> TerraformResult<String> {
        let args = lifecycle_args(&["apply", "-input=false", "-auto-approve", "-lock=false"], options);
        self.run(options, args).map(|output| output.stdout)
    }

    /// Runs `init` followed by `apply`.
    ///
    /// # Errors
    ///
    /// See [`Terraform::init`].
    pub fn init_and_apply(&self, options: &TerraformOptions) -> TerraformResult<String> {
        self.init(options)?;
        self.apply(options)
    }

    /// Runs `terraform plan` with vars and targets.
    ///
    /// # Errors
    ///
    /// See [`Terraform::init`]. Plan-time validation failures surface as
    /// [`TerraformError::CommandFailed`] carrying Terraform's output.
    pub fn plan(&self, options: &TerraformOptions) -> TerraformResult<String> {
        let args = lifecycle_args(&["plan", "-input=false", "-lock=false"], options);
        self.run(options, args).map(|output| output.stdout)
    }

    /// Runs `terraform destroy` with vars and targets.
    ///
    /// # Errors
    ///
    /// See [`Terraform::init`].
    pub fn destroy(&self, options: &TerraformOptions) -> TerraformResult<String> {
        let args = lifecycle_args(
            &["destroy", "-auto-approve", "-input=false", "-lock=false"],
            options,
        );
        self.run(options, args).map(|output| output.stdout)
    }

    /// Returns a guard that destroys the module when dropped.
    pub fn destroy_on_drop(&self, options: &TerraformOptions) -> DestroyGuard {
        DestroyGuard::new(self.clone(), options.clone())
    }

    // ------------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------------

    /// Reads every output into an [`OutputBag`].
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError`] when the command fails or the document is
    /// not a valid output document.
    pub fn output_all(&self, options: &TerraformOptions) -> TerraformResult<OutputBag> {
        let args = strings(&["output", "-no-color", "-json"]);
        let output = self.run(options, args)?;
        Ok(OutputBag::from_terraform_json(&output.stdout)?)
    }

    /// Reads one output rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Output`] when the output is absent.
    pub fn output(&self, options: &TerraformOptions, name: &str) -> TerraformResult<String> {
        Ok(output_string(&self.output_all(options)?, name)?)
    }

    /// Reads a list output with elements rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Output`] when the output is absent or not a list.
    pub fn output_list(
        &self,
        options: &TerraformOptions,
        name: &str,
    ) -> TerraformResult<Vec<String>> {
        Ok(output_list(&self.output_all(options)?, name)?)
    }

    /// Reads a map output with values rendered as text.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Output`] when the output is absent or not a map.
    pub fn output_map(
        &self,
        options: &TerraformOptions,
        name: &str,
    ) -> TerraformResult<BTreeMap<String, String>> {
        Ok(output_map(&self.output_all(options)?, name)?)
    }

    /// Reads the sorted key set of a map output.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Output`] when the output is absent or not a map.
    pub fn sorted_output_keys(
        &self,
        options: &TerraformOptions,
        name: &str,
    ) -> TerraformResult<SortedKeyList> {
        Ok(extract_sorted_keys(&self.output_all(options)?, name)?)
    }

    /// Reads a `map(list(string))` output.
    ///
    /// # Errors
    ///
    /// Returns [`TerraformError::Output`] when the output is absent, not a map,
    /// or holds a non-list value or non-string element.
    pub fn output_map_of_string_lists(
        &self,
        options: &TerraformOptions,
        name: &str,
    ) -> TerraformResult<StringListMap> {
        Ok(normalize_list_map(&self.output_all(options)?, name)?)
    }

    // ------------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------------

    /// Effective retry budget for one invocation.
    fn retry_budget(&self, options: &TerraformOptions) -> (u32, Duration) {
        (
            self.config.max_retries_override.unwrap_or(options.max_retries),
            self.config.time_between_retries_override.unwrap_or(options.time_between_retries),
        )
    }

    /// Runs one command under the retry policy.
    fn run(&self, options: &TerraformOptions, args: Vec<String>) -> TerraformResult<CommandOutput> {
        options.validate()?;
        let invocation = CommandInvocation {
            binary: self.config.binary.clone(),
            args,
            working_dir: options.terraform_dir.clone(),
            env: options.env.clone(),
        };
        let command = invocation.display();
        let (max_retries, delay) = self.retry_budget(options);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let started = Instant::now();
            let output = match self.runner.run(&invocation) {
                Ok(output) => output,
                Err(err) => {
                    self.audit.record(
                        &CommandAuditEvent::new(
                            CommandAuditEvent::COMMAND,
                            command.clone(),
                            &invocation.working_dir,
                            attempt,
                            AuditOutcome::Error,
                        )
                        .with_duration(started.elapsed())
                        .with_detail(err.to_string()),
                    );
                    return Err(err);
                }
            };
            let event = CommandAuditEvent::new(
                CommandAuditEvent::COMMAND,
                command.clone(),
                &invocation.working_dir,
                attempt,
                AuditOutcome::Ok,
            )
            .with_exit_code(output.exit_code)
            .with_duration(started.elapsed());
            if output.success() {
                self.audit.record(&event);
                return Ok(output);
            }

            let combined = output.combined();
            let reason = options.retry_reason(&combined);
            match reason {
                Some(reason) if attempt <= max_retries => {
                    self.audit.record(&CommandAuditEvent {
                        event: CommandAuditEvent::RETRY,
                        outcome: AuditOutcome::Retry,
                        detail: Some(reason.to_string()),
                        ..event
                    });
                    std::thread::sleep(delay);
                }
                _ => {
                    let detail = reason.map_or_else(
                        || "non-retryable failure".to_string(),
                        |reason| format!("retries exhausted: {reason}"),
                    );
                    self.audit.record(&CommandAuditEvent {
                        outcome: AuditOutcome::Error,
                        detail: Some(detail),
                        ..event
                    });
                    return Err(TerraformError::CommandFailed {
                        command,
                        exit_code: output.exit_code,
                        output: combined,
                    });
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Argument Helpers
// ============================================================================

/// Converts static arguments into owned strings.
fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

/// Appends `-no-color` when requested.
fn push_no_color(args: &mut Vec<String>, options: &TerraformOptions) {
    if options.no_color {
        args.push("-no-color".to_string());
    }
}

/// Builds a lifecycle argv: base flags, color, vars, then targets.
fn lifecycle_args(base: &[&str], options: &TerraformOptions) -> Vec<String> {
    let mut args = strings(base);
    push_no_color(&mut args, options);
    args.extend(var_args(&options.vars));
    args.extend(options.targets.iter().map(|target| format!("-target={target}")));
    args
}

// ============================================================================
// SECTION: Tests
// ============================================================================
