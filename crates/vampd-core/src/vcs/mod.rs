//! Version control helpers
//!
//! Only git is supported: vampd clones its provisioning repository with it.

pub mod git;

pub use git::{resolve_clone_url, GitTool};
