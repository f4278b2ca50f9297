//! Version-control collaborator
//!
//! The branch validator and release preparer only need three things from
//! git: the current branch name, whether the working tree is dirty, and a
//! best-effort "stage this file and commit it". The [VersionControl] trait
//! captures exactly that so the core logic can run against either
//! implementation:
//!
//! - [repository::Git2Repository]: a real repository, via the `git2` crate
//! - [mock::MockRepository]: an in-memory stand-in for tests
//!
//! ```rust
//! # use git_branchguard::git::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> git_branchguard::Result<()> {
//! let branch = vcs.current_branch()?;
//! if vcs.is_dirty()? {
//!     println!("{} has uncommitted changes", branch);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Git operations needed by git-branchguard
///
/// ## Error Handling
///
/// Queries fail with [crate::error::BranchGuardError::VersionControlQueryFailed];
/// commits fail with [crate::error::BranchGuardError::VersionControlCommitFailed].
/// Callers decide whether a failure is fatal.
pub trait VersionControl: Send + Sync {
    /// Short name of the branch HEAD points to, trimmed.
    ///
    /// A detached HEAD is reported as `HEAD`.
    fn current_branch(&self) -> Result<String>;

    /// Whether the working tree has any uncommitted modification,
    /// untracked files included.
    fn is_dirty(&self) -> Result<bool>;

    /// Stage `path` and commit it on HEAD with `subject` as the first line
    /// and `body` as the message body.
    ///
    /// # Arguments
    /// * `path` - File to stage; absolute or relative to the process directory
    /// * `subject` - Commit subject line
    /// * `body` - Commit message body
    fn commit_file(&self, path: &Path, subject: &str, body: &str) -> Result<()>;
}
