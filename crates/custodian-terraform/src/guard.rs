// crates/custodian-terraform/src/guard.rs
// ============================================================================
// Module: Scoped Cleanup
// Description: Destroy-on-drop guards and per-module serialization locks.
// Purpose: Release provisioned infrastructure on every exit path.
// Dependencies: crate::{audit, options, terraform}
// ============================================================================

//! ## Overview
//! [`DestroyGuard`] runs `terraform destroy` when it leaves scope, including
//! while unwinding from a failed assertion. Destroy failures are recorded to
//! the handle's audit sink and never panic.
//!
//! [`module_lock`] hands out a process-wide lock per canonical module
//! directory so two scenarios never apply the same module concurrently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::time::Instant;

use crate::audit::AuditOutcome;
use crate::audit::CommandAuditEvent;
use crate::error::TerraformError;
use crate::error::TerraformResult;
use crate::options::TerraformOptions;
use crate::terraform::Terraform;

// ============================================================================
// SECTION: Destroy Guard
// ============================================================================

/// Destroys a module when dropped unless disarmed.
#[must_use = "dropping the guard immediately destroys the module"]
pub struct DestroyGuard {
    /// Handle used for the destroy.
    terraform: Terraform,
    /// Options of the module to destroy.
    options: TerraformOptions,
    /// Whether drop still destroys.
    armed: bool,
}

impl DestroyGuard {
    /// Creates an armed guard.
    pub(crate) const fn new(terraform: Terraform, options: TerraformOptions) -> Self {
        Self {
            terraform,
            options,
            armed: true,
        }
    }

    /// Returns the options the guard will destroy with.
    #[must_use]
    pub const fn options(&self) -> &TerraformOptions {
        &self.options
    }

    /// Returns true while drop still destroys.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Keeps the module's resources; drop becomes a no-op.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Destroys now and surfaces the result instead of only auditing it.
    ///
    /// # Errors
    ///
    /// Returns the destroy failure.
    pub fn destroy_now(mut self) -> TerraformResult<()> {
        self.armed = false;
        self.terraform.destroy(&self.options).map(|_| ())
    }

    /// Runs the guarded destroy and audits its result.
    fn release(&self) {
        let started = Instant::now();
        let result = self.terraform.destroy(&self.options);
        let outcome = if result.is_ok() { AuditOutcome::Ok } else { AuditOutcome::Error };
        let mut event = CommandAuditEvent::new(
            CommandAuditEvent::DESTROY_GUARD,
            "destroy".to_string(),
            self.options.dir(),
            1,
            outcome,
        )
        .with_duration(started.elapsed());
        let mut details = Vec::new();
        if std::thread::panicking() {
            details.push("panicking".to_string());
        }
        if let Err(err) = result {
            event = event.with_exit_code(exit_code_of(&err));
            details.push(err.to_string());
        }
        if !details.is_empty() {
            event = event.with_detail(details.join(": "));
        }
        self.terraform.audit().record(&event);
    }
}

impl Drop for DestroyGuard {
    fn drop(&mut self) {
        if self.armed {
            self.release();
        }
    }
}

/// Extracts the exit code of a failed command.
const fn exit_code_of(err: &TerraformError) -> Option<i32> {
    match err {
        TerraformError::CommandFailed {
            exit_code, ..
        } => *exit_code,
        _ => None,
    }
}

// ============================================================================
// SECTION: Module Locks
// ============================================================================

/// Held lock serializing work on one module directory.
pub type ModuleLock = MutexGuard<'static, ()>;

/// Registry of per-directory locks.
fn lock_registry() -> &'static Mutex<BTreeMap<PathBuf, &'static Mutex<()>>> {
    static LOCKS: OnceLock<Mutex<BTreeMap<PathBuf, &'static Mutex<()>>>> = OnceLock::new();
    LOCKS.get_or_init(|| Mutex::new(BTreeMap::new()))
}

/// Acquires the process-wide lock for a module directory.
///
/// Paths are canonicalized when possible so `examples/periodic` and
/// `./examples/periodic` share a lock. A lock poisoned by a panicking holder
/// is recovered; the guard it protects carries no data.
#[must_use]
pub fn module_lock(dir: &Path) -> ModuleLock {
    let key = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let lock: &'static Mutex<()> = {
        let mut registry = lock_registry().lock().unwrap_or_else(PoisonError::into_inner);
        *registry.entry(key).or_insert_with(|| Box::leak(Box::new(Mutex::new(()))))
    };
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
