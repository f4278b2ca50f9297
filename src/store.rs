//! JSON-file persistence sink for the release descriptor.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::release::ReleaseDescriptor;
use crate::error::Result;

/// Well-known descriptor file name, relative to the invocation root.
pub const DESCRIPTOR_FILE: &str = "release.json";

/// Reads and writes `release.json` under one directory.
#[derive(Debug, Clone)]
pub struct DescriptorStore {
    root: PathBuf,
}

impl DescriptorStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DescriptorStore { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(DESCRIPTOR_FILE)
    }

    /// Pretty-print the descriptor and overwrite the file unconditionally.
    pub fn write(&self, descriptor: &ReleaseDescriptor) -> Result<PathBuf> {
        let path = self.path();
        fs::write(&path, render(descriptor)?)?;
        debug!(path = %path.display(), version = %descriptor.version, "wrote release descriptor");
        Ok(path)
    }

    pub fn read(&self) -> Result<ReleaseDescriptor> {
        read_descriptor(&self.path())
    }
}

/// On-disk text: two-space indented JSON with a trailing newline.
pub fn render(descriptor: &ReleaseDescriptor) -> Result<String> {
    let mut text = serde_json::to_string_pretty(descriptor)?;
    text.push('\n');
    Ok(text)
}

fn read_descriptor(path: &Path) -> Result<ReleaseDescriptor> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
