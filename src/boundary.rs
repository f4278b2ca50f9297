use std::fmt;

/// Non-fatal conditions met at the boundary with the version-control
/// collaborator. They are reported to the user but never change the exit
/// status.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The working tree has uncommitted changes
    DirtyWorkingTree { branch: String },
    /// Working-tree status could not be determined
    StatusUnavailable { reason: String },
    /// The descriptor was written but could not be committed
    CommitFailed { path: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree { branch } => {
                write!(
                    f,
                    "You have uncommitted changes on '{}'. Run \"git status\" to see details",
                    branch
                )
            }
            BoundaryWarning::StatusUnavailable { reason } => {
                write!(f, "Could not check for uncommitted changes: {}", reason)
            }
            BoundaryWarning::CommitFailed { path, reason } => {
                write!(
                    f,
                    "Failed to commit {} (may already be committed): {}",
                    path, reason
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_failed_display() {
        let warning = BoundaryWarning::CommitFailed {
            path: "release.json".to_string(),
            reason: "nothing to commit".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("release.json"));
        assert!(msg.contains("may already be committed"));
        assert!(msg.contains("nothing to commit"));
    }

    #[test]
    fn test_dirty_display_mentions_branch() {
        let warning = BoundaryWarning::DirtyWorkingTree {
            branch: "dev".to_string(),
        };
        assert!(warning.to_string().contains("'dev'"));
        assert!(warning.to_string().contains("git status"));
    }
}
