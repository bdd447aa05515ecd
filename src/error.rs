//! Error types for scanning, storage and workspace actions

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The workspace search could not produce a result set
#[derive(Debug, Error)]
pub enum ScanError {
    /// The search facility failed or wrote to its error stream
    #[error("workspace search failed: {stderr}")]
    Search {
        #[source]
        source: Option<io::Error>,
        stderr: String,
    },

    #[error("invalid skip pattern: {0}")]
    SkipPattern(#[from] regex::Error),

    #[error("scan task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A matched descriptor file could not be read
#[derive(Debug, Error)]
#[error("failed to read workspace descriptor {}: {source}", .path.display())]
pub struct DescriptorReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode stored state: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored value exists but is not the JSON we wrote
    #[error("stored value for '{key}' is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Crate-wide error for sessions and interaction handlers
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("host action failed: {0}")]
    Host(#[from] io::Error),

    #[error("no workspace matches '{0}'")]
    UnknownWorkspace(String),

    #[error("'{query}' matches several workspaces: {}", .matches.join(", "))]
    AmbiguousWorkspace { query: String, matches: Vec<String> },

    #[error("workspace '{0}' has no project folders")]
    NoProjectFolder(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
