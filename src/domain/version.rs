use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{BranchGuardError, Result};

const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";

/// A release version: three non-negative integers (major.minor.patch).
///
/// The text supplied on the command line is kept verbatim so the descriptor
/// records exactly what the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    text: String,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            text: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Parses `X.Y.Z` strictly: no prefix, no suffix, no pre-release part.
    ///
    /// # Returns
    /// * `Ok(Version)` - The parsed version
    /// * `Err(InvalidVersionFormat)` - If the input has any other shape
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || BranchGuardError::InvalidVersionFormat(input.to_string());

        let re = Regex::new(VERSION_PATTERN).map_err(|_| invalid())?;
        if !re.is_match(input) {
            return Err(invalid());
        }

        let mut parts = input.split('.').map(|p| p.parse::<u64>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch))) => Ok(Version {
                major,
                minor,
                patch,
                text: input.to_string(),
            }),
            // A component too large for u64
            _ => Err(invalid()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Version {
    type Err = BranchGuardError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
