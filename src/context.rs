//! Invocation context: everything the core logic would otherwise read from
//! the process environment.

use std::env;

/// Fallback for identities that are not set.
pub const UNKNOWN: &str = "unknown";
/// Fallback for CI metadata when running outside CI.
pub const LOCAL: &str = "local";

/// Who is running the tool, and under which CI build (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// `USER`, or `"unknown"`
    pub user: String,
    /// `BUILD_NUMBER`, or `"local"`
    pub build_number: String,
    /// `COMMIT_SHA`, or `"unknown"`
    pub commit_sha: String,
    /// `BRANCH_NAME`, or `"local"`
    pub branch_name: String,
}

impl InvocationContext {
    /// Snapshot the relevant environment variables once.
    pub fn from_env() -> Self {
        InvocationContext {
            user: read_var("USER", UNKNOWN),
            build_number: read_var("BUILD_NUMBER", LOCAL),
            commit_sha: read_var("COMMIT_SHA", UNKNOWN),
            branch_name: read_var("BRANCH_NAME", LOCAL),
        }
    }

    /// A context for a local, non-CI run by `user`.
    pub fn local(user: impl Into<String>) -> Self {
        InvocationContext {
            user: user.into(),
            ..Self::default()
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        InvocationContext {
            user: UNKNOWN.to_string(),
            build_number: LOCAL.to_string(),
            commit_sha: UNKNOWN.to_string(),
            branch_name: LOCAL.to_string(),
        }
    }
}

fn read_var(key: &str, fallback: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
