//! Workspace descriptor parsing
//!
//! A descriptor is a `.code-workspace` JSON file:
//!
//! ```json
//! { "folders": [{ "path": ".", "name": "app" }], "settings": {} }
//! ```
//!
//! Only the folder paths are kept. Malformed files yield a workspace with no
//! folders instead of an error, so one half-written file never hides the rest.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::id::workspace_id;
use super::json::is_valid_json;
use crate::error::DescriptorReadError;

/// A discovered workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Derived from `path` only
    pub id: String,
    /// File name without the workspace extension
    pub title: String,
    /// Absolute path of the descriptor file
    pub path: String,
    /// Directory containing the descriptor file
    pub directory: String,
    /// Folder paths as written in the descriptor
    pub folders: Vec<String>,
}

impl Workspace {
    /// Build the record for a descriptor at `path` with the given folders
    pub fn from_parts(path: &str, file_ext: &str, folders: Vec<String>) -> Self {
        let segments: Vec<&str> = path.split('/').collect();
        let (filename, parents) = match segments.split_last() {
            Some((last, rest)) => (*last, rest),
            None => ("", &[][..]),
        };

        Self {
            id: workspace_id(path),
            title: filename
                .strip_suffix(file_ext)
                .unwrap_or(filename)
                .to_string(),
            path: path.to_string(),
            directory: parents.join("/"),
            folders,
        }
    }

    /// Secondary line shown under the title
    pub fn subtitle(&self) -> &str {
        match self.folders.first() {
            Some(folder) if folder != "." => folder,
            _ => &self.directory,
        }
    }

    /// The first folder, resolved against the descriptor's directory
    pub fn project_folder(&self) -> Option<PathBuf> {
        self.folders
            .first()
            .map(|folder| Path::new(&self.directory).join(folder))
    }
}

/// The parts of a descriptor file we read
#[derive(Debug, Default, Deserialize)]
struct DescriptorFile {
    #[serde(default)]
    folders: Vec<FolderEntry>,
}

#[derive(Debug, Deserialize)]
struct FolderEntry {
    path: String,
    #[serde(default)]
    #[allow(dead_code)]
    name: Option<String>,
}

/// Folder paths from descriptor content, empty when the content is unusable
pub fn parse_folders(content: &str) -> Vec<String> {
    if content.is_empty() || !is_valid_json(content) {
        debug!("Descriptor is empty or not valid JSON, using no folders");
        return Vec::new();
    }

    match serde_json::from_str::<DescriptorFile>(content) {
        Ok(file) => file.folders.into_iter().map(|f| f.path).collect(),
        Err(e) => {
            debug!("Descriptor has an unexpected shape ({}), using no folders", e);
            Vec::new()
        }
    }
}

/// Read and parse the descriptor at `path`
pub fn parse_descriptor(path: &str, file_ext: &str) -> Result<Workspace, DescriptorReadError> {
    let content = fs::read_to_string(path).map_err(|source| DescriptorReadError {
        path: PathBuf::from(path),
        source,
    })?;

    Ok(Workspace::from_parts(path, file_ext, parse_folders(&content)))
}
