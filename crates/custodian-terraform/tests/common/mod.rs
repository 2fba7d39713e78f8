// crates/custodian-terraform/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Fake Terraform executable for process-runner tests.
// Purpose: Exercise real process spawning without the Terraform CLI.
// Dependencies: custodian-terraform, tempfile
// ============================================================================

//! ## Overview
//! Writes a POSIX shell script that answers `init`, `apply`, `plan`,
//! `output`, and `destroy` the way Terraform would, logging each argv line
//! to `calls.log` in the module directory.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::sync::PoisonError;

use tempfile::TempDir;

/// Fake Terraform behavior, keyed by subcommand.
const FAKE_TERRAFORM: &str = r#"#!/bin/sh
echo "$@" >> "$PWD/calls.log"
case "$1" in
  output)
    cat "$PWD/outputs.json"
    ;;
  apply)
    if [ ! -f "$PWD/applied-once" ]; then
      : > "$PWD/applied-once"
      echo "Error: Provider produced inconsistent result after apply" >&2
      exit 1
    fi
    echo "Apply complete! Resources: 1 added, 0 changed, 0 destroyed."
    ;;
  plan)
    echo "Error: External Program Execution Failed" >&2
    echo "Policy validation failed: $FAKE_TF_DETAIL" >&2
    exit 1
    ;;
  *)
    echo "$1 complete"
    ;;
esac
"#;

/// Temporary workspace holding a fake binary and a module directory.
pub struct FakeTerraform {
    /// Keeps the directory alive for the test.
    _root: TempDir,
    /// Path of the executable script.
    pub binary: PathBuf,
    /// Module working directory.
    pub module_dir: PathBuf,
}

impl FakeTerraform {
    /// Creates the script and a module directory with the given outputs.
    pub fn new(outputs_json: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let binary = root.path().join("terraform");
        fs::write(&binary, FAKE_TERRAFORM).unwrap();
        fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
        let module_dir = root.path().join("module");
        fs::create_dir(&module_dir).unwrap();
        fs::write(module_dir.join("outputs.json"), outputs_json).unwrap();
        Self {
            _root: root,
            binary,
            module_dir,
        }
    }

    /// Returns the logged argv lines.
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.module_dir.join("calls.log"))
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|text| text.lines().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Serializes script creation and execution across test threads.
///
/// Writing an executable while another thread forks can fail with
/// `ETXTBSY`; holding this lock avoids the race.
pub fn serial() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner)
}
