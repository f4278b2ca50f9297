//! User interface module - console output.
//!
//! All user-facing text goes through here; diagnostics go through
//! `tracing` and are filtered separately.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_branch_report, display_error, display_hint,
    display_invalid_branch, display_json, display_next_steps, display_success,
};

use crate::error::BranchGuardError;

/// Print a fatal error followed by its remediation text, if it has any.
pub fn display_failure(error: &BranchGuardError) {
    match error {
        BranchGuardError::UnrecognizedBranch(branch) => display_invalid_branch(branch),
        _ => {
            display_error(&error.to_string());
            if let Some(hint) = error.remediation() {
                display_hint(&hint);
            }
        }
    }
}
