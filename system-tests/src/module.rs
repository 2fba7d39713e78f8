// system-tests/src/module.rs
// ============================================================================
// Module: Module Directory Detection
// Description: Decides whether a directory holds a Terraform root module.
// Purpose: Let scenarios skip instead of running Terraform on a stray path.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A directory counts as a Terraform module only when it directly contains at
//! least one `*.tf` file. The scenario harness skips when this check fails, so
//! a missing module repository never leads to `terraform init` running in an
//! unrelated directory.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Configuration file extension Terraform loads from a module directory.
const TERRAFORM_EXTENSION: &str = "tf";

/// Checks that `dir` is a Terraform module directory.
///
/// # Errors
///
/// Returns a human-readable skip reason when the directory is missing,
/// unreadable, or holds no `*.tf` files.
pub fn check_module_dir(dir: &Path) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("module directory {} not found", dir.display()));
    }
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("module directory {} unreadable: {err}", dir.display()))?;
    let has_configuration = entries.filter_map(Result::ok).any(|entry| {
        let path = entry.path();
        path.is_file()
            && path.extension().is_some_and(|extension| extension == TERRAFORM_EXTENSION)
    });
    if has_configuration {
        Ok(())
    } else {
        Err(format!("module directory {} has no *.tf files", dir.display()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
