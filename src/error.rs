use thiserror::Error;

/// Unified error type for git-branchguard operations
#[derive(Error, Debug)]
pub enum BranchGuardError {
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid version format '{0}'. Must be X.Y.Z (e.g., 2.1.0)")]
    InvalidVersionFormat(String),

    #[error("This command must be run from a release branch (current branch: {branch})")]
    WrongBranchClass { branch: String, suggestion: String },

    #[error("Invalid branch name: {0}")]
    UnrecognizedBranch(String),

    #[error("Failed to query version control: {0}")]
    VersionControlQueryFailed(String),

    #[error("Failed to commit: {0}")]
    VersionControlCommitFailed(String),

    #[error("Descriptor serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-branchguard
pub type Result<T> = std::result::Result<T, BranchGuardError>;

impl BranchGuardError {
    /// Create a missing-argument error
    pub fn missing(msg: impl Into<String>) -> Self {
        BranchGuardError::MissingArgument(msg.into())
    }

    /// Create a query error for a failed version-control lookup
    pub fn query(msg: impl Into<String>) -> Self {
        BranchGuardError::VersionControlQueryFailed(msg.into())
    }

    /// Create a commit error for a failed stage-and-commit
    pub fn commit(msg: impl Into<String>) -> Self {
        BranchGuardError::VersionControlCommitFailed(msg.into())
    }

    /// Process exit status reported to the invoking shell.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Remediation text shown under the error, if any.
    pub fn remediation(&self) -> Option<String> {
        match self {
            BranchGuardError::MissingArgument(_) => Some(
                "Usage: git-branchguard prepare-release <version> [description]\n\
                 Example: git-branchguard prepare-release 2.1.0 \"New payment features\""
                    .to_string(),
            ),
            BranchGuardError::WrongBranchClass { suggestion, .. } => Some(format!(
                "The branch must match release/DDMMYY[-n]-description; \
                 a bare release/ prefix is not enough.\n\
                 To create a release branch:\n  {}",
                suggestion
            )),
            _ => None,
        }
    }
}
