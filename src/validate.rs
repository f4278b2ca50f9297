//! Branch validation: classify the current branch and collect its merge
//! guidance plus the (informational) dirty-tree check.

use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::domain::branch::{classify, merge_policy, BranchClass, MergePolicy};
use crate::error::{BranchGuardError, Result};
use crate::git::VersionControl;

/// Everything `validate-branch` reports for a recognized branch.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchReport {
    pub branch: String,
    pub class: BranchClass,
    pub policy: &'static MergePolicy,
    pub warning: Option<BoundaryWarning>,
}

/// Classify `branch` and attach its policy.
///
/// # Returns
/// * `Ok(BranchReport)` - The branch belongs to a known class
/// * `Err(UnrecognizedBranch)` - The name matches no pattern
pub fn validate_branch<V: VersionControl + ?Sized>(
    vcs: &V,
    branch: &str,
) -> Result<BranchReport> {
    let class = classify(branch);
    let policy =
        merge_policy(class).ok_or_else(|| BranchGuardError::UnrecognizedBranch(branch.to_string()))?;

    let warning = match vcs.is_dirty() {
        Ok(true) => Some(BoundaryWarning::DirtyWorkingTree {
            branch: branch.to_string(),
        }),
        Ok(false) => None,
        Err(e) => {
            debug!(error = %e, "ignoring working tree status failure");
            Some(BoundaryWarning::StatusUnavailable {
                reason: e.to_string(),
            })
        }
    };

    Ok(BranchReport {
        branch: branch.to_string(),
        class,
        policy,
        warning,
    })
}
