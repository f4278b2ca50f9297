use std::path::{Path, PathBuf};

use git2::{Commit, ErrorCode, Repository as Git2Repo, StatusOptions};
use tracing::debug;

use crate::error::{BranchGuardError, Result};
use crate::git::VersionControl;

/// Git-backed [VersionControl] rooted at a directory inside a work tree.
///
/// The repository is discovered on every call, so constructing one never
/// fails; running outside a repository surfaces as a query or commit error
/// at the point of use.
pub struct Git2Repository {
    root: PathBuf,
}

impl Git2Repository {
    /// Discover the repository containing `path` (or one of its parents)
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Git2Repository {
            root: path.as_ref().to_path_buf(),
        }
    }

    fn repo(&self) -> std::result::Result<Git2Repo, git2::Error> {
        Git2Repo::discover(&self.root)
    }

    /// Path of `path` relative to the work tree, as the index wants it
    fn index_path(repo: &Git2Repo, root: &Path, path: &Path) -> Result<PathBuf> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| BranchGuardError::commit("repository has no working directory"))?
            .canonicalize()?;
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
        .canonicalize()?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                BranchGuardError::commit(format!(
                    "'{}' is outside the working tree",
                    absolute.display()
                ))
            })
    }
}

impl VersionControl for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let repo = self
            .repo()
            .map_err(|e| BranchGuardError::query(e.message().to_string()))?;

        let head = repo
            .find_reference("HEAD")
            .map_err(|e| BranchGuardError::query(e.message().to_string()))?;

        // An unborn branch still has a symbolic HEAD; only a detached HEAD
        // has no branch name.
        let branch = match head.symbolic_target() {
            Some(target) => target
                .strip_prefix("refs/heads/")
                .unwrap_or(target)
                .trim()
                .to_string(),
            None => "HEAD".to_string(),
        };

        debug!(branch = %branch, "resolved current branch");
        Ok(branch)
    }

    fn is_dirty(&self) -> Result<bool> {
        let repo = self
            .repo()
            .map_err(|e| BranchGuardError::query(e.message().to_string()))?;

        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = repo
            .statuses(Some(&mut options))
            .map_err(|e| BranchGuardError::query(e.message().to_string()))?;

        debug!(entries = statuses.len(), "queried working tree status");
        Ok(!statuses.is_empty())
    }

    fn commit_file(&self, path: &Path, subject: &str, body: &str) -> Result<()> {
        let fail = |e: git2::Error| BranchGuardError::commit(e.message().to_string());

        let repo = self.repo().map_err(fail)?;
        let relative = Self::index_path(&repo, &self.root, path)?;

        let mut index = repo.index().map_err(fail)?;
        index.add_path(&relative).map_err(fail)?;
        index.write().map_err(fail)?;
        let tree_id = index.write_tree().map_err(fail)?;
        let tree = repo.find_tree(tree_id).map_err(fail)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(fail)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(fail(e)),
        };

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Err(BranchGuardError::commit(
                    "nothing to commit, working tree clean",
                ));
            }
        }

        let signature = repo.signature().map_err(fail)?;
        let message = format!("{}\n\n{}\n", subject, body);
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &message,
                &tree,
                &parents,
            )
            .map_err(fail)?;

        debug!(commit = %oid, path = %relative.display(), "committed file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo(branch: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
        dir
    }

    #[test]
    fn test_current_branch_on_unborn_branch() {
        let dir = init_repo("release/091025-payments");
        let repo = Git2Repository::open(dir.path());
        assert_eq!(repo.current_branch().unwrap(), "release/091025-payments");
    }

    #[test]
    fn test_outside_a_repository() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repository::open(dir.path().join("missing"));
        assert!(matches!(
            repo.current_branch(),
            Err(BranchGuardError::VersionControlQueryFailed(_))
        ));
    }

    #[test]
    fn test_dirty_status_sees_untracked_files() {
        let dir = init_repo("dev");
        let repo = Git2Repository::open(dir.path());
        assert!(!repo.is_dirty().unwrap());

        fs::write(dir.path().join("notes.txt"), "wip").unwrap();
        assert!(repo.is_dirty().unwrap());
    }

    #[test]
    fn test_commit_file_then_nothing_to_commit() {
        let dir = init_repo("release/091025-payments");
        let file = dir.path().join("release.json");
        fs::write(&file, "{}\n").unwrap();

        let repo = Git2Repository::open(dir.path());
        repo.commit_file(Path::new("release.json"), "chore: prepare release 1.0.0", "desc")
            .unwrap();
        assert!(!repo.is_dirty().unwrap());

        let raw = Git2Repo::open(dir.path()).unwrap();
        let head = raw.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.summary(), Some("chore: prepare release 1.0.0"));
        assert!(head.message().unwrap().contains("\n\ndesc"));
        assert_eq!(repo.current_branch().unwrap(), "release/091025-payments");

        let err = repo
            .commit_file(Path::new("release.json"), "again", "desc")
            .unwrap_err();
        assert!(matches!(err, BranchGuardError::VersionControlCommitFailed(_)));
    }

    #[test]
    fn test_detached_head_reports_head() {
        let dir = init_repo("main");
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let repo = Git2Repository::open(dir.path());
        repo.commit_file(Path::new("a.txt"), "init", "").unwrap();

        let raw = Git2Repo::open(dir.path()).unwrap();
        let oid = raw.head().unwrap().target().unwrap();
        raw.set_head_detached(oid).unwrap();

        assert_eq!(repo.current_branch().unwrap(), "HEAD");
    }
}
