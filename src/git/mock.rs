use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{BranchGuardError, Result};
use crate::git::VersionControl;

/// A commit recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub path: PathBuf,
    pub subject: String,
    pub body: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: Option<String>,
    dirty: Option<bool>,
    fail_commits: bool,
    commits: Mutex<Vec<RecordedCommit>>,
}

impl MockRepository {
    /// A clean repository checked out on `branch`
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
            dirty: Some(false),
            fail_commits: false,
            commits: Mutex::new(Vec::new()),
        }
    }

    /// A repository whose every query fails, like running outside a work tree
    pub fn unavailable() -> Self {
        MockRepository {
            branch: None,
            dirty: None,
            fail_commits: true,
            commits: Mutex::new(Vec::new()),
        }
    }

    /// Mark the working tree as dirty (or clean)
    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = Some(dirty);
        self
    }

    /// Make the status query fail while the branch lookup still works
    pub fn with_failing_status(mut self) -> Self {
        self.dirty = None;
        self
    }

    /// Make every commit attempt fail
    pub fn with_failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Commits recorded so far, oldest first
    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl VersionControl for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| BranchGuardError::query("not a git repository"))
    }

    fn is_dirty(&self) -> Result<bool> {
        self.dirty
            .ok_or_else(|| BranchGuardError::query("status unavailable"))
    }

    fn commit_file(&self, path: &Path, subject: &str, body: &str) -> Result<()> {
        if self.fail_commits {
            return Err(BranchGuardError::commit("nothing to commit"));
        }

        let mut commits = self
            .commits
            .lock()
            .map_err(|_| BranchGuardError::commit("mock commit log poisoned"))?;
        commits.push(RecordedCommit {
            path: path.to_path_buf(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_branch() {
        let repo = MockRepository::on_branch("feature/x");
        assert_eq!(repo.current_branch().unwrap(), "feature/x");
        assert!(!repo.is_dirty().unwrap());
    }

    #[test]
    fn test_mock_repository_dirty() {
        let repo = MockRepository::on_branch("dev").with_dirty(true);
        assert!(repo.is_dirty().unwrap());
    }

    #[test]
    fn test_mock_repository_unavailable() {
        let repo = MockRepository::unavailable();
        assert!(matches!(
            repo.current_branch(),
            Err(BranchGuardError::VersionControlQueryFailed(_))
        ));
        assert!(repo.is_dirty().is_err());
    }

    #[test]
    fn test_mock_repository_records_commits() {
        let repo = MockRepository::on_branch("release/091025-x");
        repo.commit_file(Path::new("release.json"), "subject", "body")
            .unwrap();

        let commits = repo.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].path, PathBuf::from("release.json"));
        assert_eq!(commits[0].subject, "subject");
        assert_eq!(commits[0].body, "body");
    }

    #[test]
    fn test_mock_repository_failing_commits() {
        let repo = MockRepository::on_branch("release/091025-x").with_failing_commits();
        let err = repo
            .commit_file(Path::new("release.json"), "s", "b")
            .unwrap_err();
        assert!(matches!(err, BranchGuardError::VersionControlCommitFailed(_)));
        assert!(repo.commits().is_empty());
    }
}
