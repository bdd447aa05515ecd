//! Configuration and platform-specific paths

use anyhow::{Context, Result};
use comfy_table::Color;
use std::path::PathBuf;
use std::time::Duration;

use crate::workspace::scanner::SearchBackend;

/// Extension of editor workspace descriptor files
pub const FILE_EXT: &str = ".code-workspace";

/// Path fragments excluded from the scan
pub const SKIP_DIRS: &[&str] = &["/vendor", "/node_modules"];

/// Key under which the persisted state is stored
pub const STORAGE_KEY: &str = "vsCodeWorkspaces";

pub const MAX_RECENTS: usize = 3;

/// How long a scan result is reused before rescanning
pub const TTL: Duration = Duration::from_secs(10 * 60);

/// The application workspaces are opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorApp {
    /// Application name, as used by `open -a` on macOS
    pub name: String,
    /// Command launched on other platforms
    pub command: String,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self {
            name: "Visual Studio Code".to_string(),
            command: "code".to_string(),
        }
    }
}

/// Settings shared by the scanner, the store and the cache orchestrator
///
/// Built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub file_ext: String,
    pub skip_dirs: Vec<String>,
    pub storage_key: String,
    pub max_recents: usize,
    pub ttl: Duration,
    /// Directory the scan is confined to
    pub search_root: PathBuf,
    pub backend: SearchBackend,
    pub editor: EditorApp,
    pub favorite_icon: String,
    pub favorite_color: Color,
}

impl Config {
    /// Defaults with the scan rooted at `search_root`
    pub fn new(search_root: impl Into<PathBuf>) -> Self {
        Self {
            file_ext: FILE_EXT.to_string(),
            skip_dirs: SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            storage_key: STORAGE_KEY.to_string(),
            max_recents: MAX_RECENTS,
            ttl: TTL,
            search_root: search_root.into(),
            backend: SearchBackend::default(),
            editor: EditorApp::default(),
            favorite_icon: "★".to_string(),
            favorite_color: Color::Yellow,
        }
    }

    /// Defaults with the scan rooted at the user's home directory
    pub fn for_home() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::new(home))
    }
}

/// Get the directory holding this tool's data
/// - macOS: ~/Library/Application Support/code-workspaces/
/// - Linux: ~/.local/share/code-workspaces/ (or $XDG_DATA_HOME)
/// - Windows: %APPDATA%/code-workspaces/
pub fn data_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("code-workspaces"))
}

/// Get the key-value storage file
pub fn storage_file() -> Result<PathBuf> {
    Ok(data_dir()?.join("storage.json"))
}
