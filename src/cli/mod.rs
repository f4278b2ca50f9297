pub mod orchestration;

pub use orchestration::{execute, Command, Workspace};
