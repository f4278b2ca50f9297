use chrono::{DateTime, Datelike, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::version::Version;

/// Description used when none is given on the command line.
pub const DEFAULT_DESCRIPTION: &str = "Release preparation";

/// The persisted record for one release in preparation.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDescriptor {
    pub version: String,
    pub release_date: String,
    pub rc_build_counter: u64,
    #[serde(rename = "lastRCTag")]
    pub last_rc_tag: String,
    pub description: String,
    pub branch: String,
    pub prepared_by: String,
    pub prepared_at: String,
}

impl ReleaseDescriptor {
    /// Derive a fresh descriptor. RC state always starts over.
    pub fn new(
        version: &Version,
        description: &str,
        branch: &str,
        prepared_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        ReleaseDescriptor {
            version: version.to_string(),
            release_date: now.format("%Y-%m-%d").to_string(),
            rc_build_counter: 0,
            last_rc_tag: String::new(),
            description: description.to_string(),
            branch: branch.to_string(),
            prepared_by: prepared_by.to_string(),
            prepared_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Commit subject line for the descriptor commit.
    pub fn commit_subject(&self) -> String {
        format!("chore: prepare release {}", self.version)
    }
}

/// Turn free text into a branch-name token: lowercase, runs of anything
/// outside `[a-z0-9]` collapse to one `-`, no leading or trailing `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        "release".to_string()
    } else {
        slug
    }
}

/// The `git checkout -b` command that creates a well-formed release branch
/// for today's date.
///
/// The `DDMMYY` token uses the local date, while `releaseDate` is the UTC
/// date, so near midnight the two can differ for the same run.
pub fn release_branch_suggestion(description: &str, now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&Local);
    format!(
        "git checkout -b release/{:02}{:02}{:02}-{}",
        local.day(),
        local.month(),
        local.year().rem_euclid(100),
        slugify(description)
    )
}

/// Build metadata reported by `build-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: String,
    pub commit: String,
    pub branch: String,
    pub timestamp: String,
}
