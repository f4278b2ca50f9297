//! Release preparation: gate on the branch class, derive the descriptor,
//! persist it, then hand it to version control on a best-effort basis.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::context::InvocationContext;
use crate::domain::branch::{classify, BranchClass};
use crate::domain::release::{release_branch_suggestion, ReleaseDescriptor, DEFAULT_DESCRIPTION};
use crate::domain::version::Version;
use crate::error::{BranchGuardError, Result};
use crate::git::VersionControl;
use crate::store::DescriptorStore;

/// Outcome of a successful preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRelease {
    pub descriptor: ReleaseDescriptor,
    pub path: PathBuf,
    /// Set when the commit step failed and was downgraded.
    pub warning: Option<BoundaryWarning>,
}

impl PreparedRelease {
    pub fn committed(&self) -> bool {
        self.warning.is_none()
    }
}

pub struct ReleasePreparer<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
    store: DescriptorStore,
    context: InvocationContext,
}

impl<'a, V: VersionControl + ?Sized> ReleasePreparer<'a, V> {
    pub fn new(vcs: &'a V, store: DescriptorStore, context: InvocationContext) -> Self {
        ReleasePreparer {
            vcs,
            store,
            context,
        }
    }

    /// Prepare a release on `current_branch` as of now.
    pub fn prepare(
        &self,
        version: &str,
        description: Option<&str>,
        current_branch: &str,
    ) -> Result<PreparedRelease> {
        self.prepare_at(version, description, current_branch, Utc::now())
    }

    /// Prepare a release as of `now`.
    ///
    /// Validation happens before anything touches the disk: a bad version or
    /// a non-release branch leaves any existing descriptor alone.
    pub fn prepare_at(
        &self,
        version: &str,
        description: Option<&str>,
        current_branch: &str,
        now: DateTime<Utc>,
    ) -> Result<PreparedRelease> {
        let version = Version::parse(version)?;
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION);

        if classify(current_branch) != BranchClass::Release {
            return Err(BranchGuardError::WrongBranchClass {
                branch: current_branch.to_string(),
                suggestion: release_branch_suggestion(description, now),
            });
        }

        let descriptor = ReleaseDescriptor::new(
            &version,
            description,
            current_branch,
            &self.context.user,
            now,
        );
        let path = self.store.write(&descriptor)?;
        info!(version = %descriptor.version, branch = %descriptor.branch, "prepared release descriptor");

        let warning = match self
            .vcs
            .commit_file(&path, &descriptor.commit_subject(), &descriptor.description)
        {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "descriptor commit failed, continuing");
                Some(BoundaryWarning::CommitFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        Ok(PreparedRelease {
            descriptor,
            path,
            warning,
        })
    }
}
