//! Domain logic - pure branch and release rules independent of git operations

pub mod branch;
pub mod release;
pub mod version;

pub use branch::{classify, merge_policy, BranchClass, MergePolicy};
pub use release::{ReleaseDescriptor, DEFAULT_DESCRIPTION};
pub use version::Version;
