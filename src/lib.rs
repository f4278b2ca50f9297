pub mod boundary;
pub mod cli;
pub mod context;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod store;
pub mod ui;
pub mod validate;

pub use error::{BranchGuardError, Result};
