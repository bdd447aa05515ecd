//! Workspace discovery: descriptor parsing, identifiers and the filesystem scan

pub mod descriptor;
pub mod id;
pub mod json;
pub mod scanner;

pub use descriptor::{parse_descriptor, Workspace};
pub use id::workspace_id;
pub use scanner::{Scanner, SearchBackend};
