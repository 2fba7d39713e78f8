// crates/custodian-terraform/src/audit.rs
// ============================================================================
// Module: Terraform Audit Logging
// Description: Structured audit events for Terraform command execution.
// Purpose: Emit JSON-line command records without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every Terraform attempt, retry decision, and guarded destroy produces a
//! [`CommandAuditEvent`]. Sinks decide where events go: stderr, an append-only
//! file, memory (tests), or nowhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label for an audited step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Step succeeded.
    Ok,
    /// Step failed and will not be retried.
    Error,
    /// Step failed with a retryable error and will be retried.
    Retry,
}

/// Terraform command audit payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Rendered command line.
    pub command: String,
    /// Module working directory.
    pub working_dir: String,
    /// One-based attempt number.
    pub attempt: u32,
    /// Step outcome.
    pub outcome: AuditOutcome,
    /// Process exit code when one was observed.
    pub exit_code: Option<i32>,
    /// Wall-clock duration of the attempt in milliseconds.
    pub duration_ms: u128,
    /// Retry reason or failure summary.
    pub detail: Option<String>,
}

impl CommandAuditEvent {
    /// Event name for a completed command attempt.
    pub const COMMAND: &'static str = "terraform_command";
    /// Event name for a retry decision.
    pub const RETRY: &'static str = "terraform_retry";
    /// Event name for a destroy triggered by a scope guard.
    pub const DESTROY_GUARD: &'static str = "terraform_destroy_guard";

    /// Builds an event stamped with the current time.
    #[must_use]
    pub fn new(
        event: &'static str,
        command: String,
        working_dir: &Path,
        attempt: u32,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            command,
            working_dir: working_dir.display().to_string(),
            attempt,
            outcome,
            exit_code: None,
            duration_ms: 0,
            detail: None,
        }
    }

    /// Sets the observed exit code.
    #[must_use]
    pub const fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    /// Sets the attempt duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis();
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Returns milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for Terraform command events.
pub trait TerraformAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &CommandAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl TerraformAuditSink for StderrAuditSink {
    fn record(&self, event: &CommandAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl TerraformAuditSink for FileAuditSink {
    fn record(&self, event: &CommandAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<CommandAuditEvent>>,
}

impl MemoryAuditSink {
    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<CommandAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl TerraformAuditSink for MemoryAuditSink {
    fn record(&self, event: &CommandAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl TerraformAuditSink for NoopAuditSink {
    fn record(&self, _event: &CommandAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
