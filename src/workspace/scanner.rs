//! Workspace scanner
//!
//! Finds every descriptor under the search root, drops paths matching the skip
//! filter, parses each survivor and returns them sorted by title.

use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::descriptor::{parse_descriptor, Workspace};
use crate::config::Config;
use crate::error::ScanError;

/// Filesystem-search facility used to enumerate descriptor files
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchBackend {
    /// Recursive directory walk
    Walk,
    /// macOS Spotlight index via `mdfind`
    Spotlight,
}

impl Default for SearchBackend {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Spotlight
        } else {
            Self::Walk
        }
    }
}

/// Build the exclusion filter from path fragments
///
/// Fragments are matched literally anywhere in a path. Returns `None` when
/// there is nothing to exclude.
pub fn skip_filter(fragments: &[String]) -> Result<Option<Regex>, regex::Error> {
    if fragments.is_empty() {
        return Ok(None);
    }

    let pattern = fragments
        .iter()
        .map(|f| regex::escape(f))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&pattern).map(Some)
}

fn is_skipped(path: &str, skip: Option<&Regex>) -> bool {
    skip.is_some_and(|re| re.is_match(path))
}

pub struct Scanner {
    root: PathBuf,
    file_ext: String,
    skip: Option<Regex>,
    backend: SearchBackend,
}

impl Scanner {
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        Ok(Self {
            root: config.search_root.clone(),
            file_ext: config.file_ext.clone(),
            skip: skip_filter(&config.skip_dirs)?,
            backend: config.backend,
        })
    }

    /// Scan the search root for workspaces
    ///
    /// Fails as a whole if the search itself fails. A descriptor that cannot
    /// be read is logged and left out.
    pub async fn scan(&self) -> Result<Vec<Workspace>, ScanError> {
        info!(
            root = %self.root.display(),
            backend = ?self.backend,
            "Scanning for *{} files",
            self.file_ext
        );

        let paths = match self.backend {
            SearchBackend::Walk => self.walk().await?,
            SearchBackend::Spotlight => self.spotlight().await?,
        };

        let file_ext = self.file_ext.clone();
        let workspaces =
            tokio::task::spawn_blocking(move || parse_all(&paths, &file_ext)).await?;

        info!(count = workspaces.len(), "Scan finished");
        Ok(workspaces)
    }

    async fn walk(&self) -> Result<Vec<String>, ScanError> {
        let root = self.root.clone();
        let file_ext = self.file_ext.clone();
        let skip = self.skip.clone();

        tokio::task::spawn_blocking(move || walk_root(&root, &file_ext, skip.as_ref())).await?
    }

    async fn spotlight(&self) -> Result<Vec<String>, ScanError> {
        let query = format!("kMDItemFSName=*{}", self.file_ext);
        let root = self.root.to_string_lossy();
        let stdout = run_search("mdfind", &[query.as_str(), "-onlyin", root.as_ref()]).await?;

        Ok(stdout
            .lines()
            .filter(|line| !line.is_empty())
            .filter(|line| !is_skipped(line, self.skip.as_ref()))
            .map(str::to_string)
            .collect())
    }
}

/// Run a search command and return its standard output
///
/// Anything written to standard error fails the search.
async fn run_search(program: &str, args: &[&str]) -> Result<String, ScanError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| ScanError::Search {
            stderr: format!("failed to run {}", program),
            source: Some(source),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return Err(ScanError::Search {
            source: None,
            stderr,
        });
    }

    if !output.status.success() {
        return Err(ScanError::Search {
            source: None,
            stderr: format!("{} exited with {}", program, output.status),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn walk_root(root: &Path, file_ext: &str, skip: Option<&Regex>) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::Search {
            source: None,
            stderr: format!("search root is not a directory: {}", root.display()),
        });
    }

    let paths = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(&entry.path().to_string_lossy(), skip))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(file_ext))
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .collect();

    Ok(paths)
}

/// Parse every path, keeping readable descriptors, sorted by title
fn parse_all(paths: &[String], file_ext: &str) -> Vec<Workspace> {
    let mut workspaces: Vec<Workspace> = paths
        .iter()
        .filter_map(|path| match parse_descriptor(path, file_ext) {
            Ok(ws) => Some(ws),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect();

    // Stable: equal titles keep search order
    workspaces.sort_by(|a, b| a.title.cmp(&b.title));
    workspaces
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str, content: &[u8]) -> String {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    fn walk_config(root: &Path) -> Config {
        let mut config = Config::new(root);
        config.backend = SearchBackend::Walk;
        config
    }

    #[test]
    fn test_skip_filter() {
        let re = skip_filter(&["/vendor".to_string(), "/node_modules".to_string()])
            .unwrap()
            .unwrap();
        assert!(re.is_match("/home/u/app/node_modules/x.code-workspace"));
        assert!(re.is_match("/home/u/php/vendor/pkg/y.code-workspace"));
        assert!(!re.is_match("/home/u/app/z.code-workspace"));
    }

    #[test]
    fn test_skip_filter_is_literal() {
        let re = skip_filter(&["/a.b".to_string()]).unwrap().unwrap();
        assert!(re.is_match("/x/a.b/c"));
        assert!(!re.is_match("/x/axb/c"));
    }

    #[test]
    fn test_skip_filter_empty() {
        assert!(skip_filter(&[]).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scan_sorted_by_title() {
        let dir = TempDir::new().unwrap();
        let folders = br#"{"folders": [{"path": "."}]}"#;
        touch(dir.path(), "one/b.code-workspace", folders);
        touch(dir.path(), "two/a.code-workspace", folders);
        touch(dir.path(), "c.code-workspace", folders);

        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        let titles: Vec<String> = scanner
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|ws| ws.title)
            .collect();

        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_scan_equal_titles_keep_search_order() {
        let dir = TempDir::new().unwrap();
        let first = touch(dir.path(), "a/same.code-workspace", b"{}");
        let second = touch(dir.path(), "b/same.code-workspace", b"{}");

        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        let paths: Vec<String> = scanner
            .scan()
            .await
            .unwrap()
            .into_iter()
            .map(|ws| ws.path)
            .collect();

        assert_eq!(paths, vec![first, second]);
    }

    #[tokio::test]
    async fn test_scan_skips_excluded_dirs_and_other_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/app.code-workspace", b"{}");
        touch(dir.path(), "app/node_modules/dep/dep.code-workspace", b"{}");
        touch(dir.path(), "php/vendor/lib/lib.code-workspace", b"{}");
        touch(dir.path(), "app/settings.json", b"{}");
        fs::create_dir_all(dir.path().join("dir.code-workspace")).unwrap();

        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        let workspaces = scanner.scan().await.unwrap();

        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].title, "app");
    }

    #[tokio::test]
    async fn test_scan_tolerates_malformed_descriptor() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "broken.code-workspace", b"{ \"folders\": [");
        touch(dir.path(), "good.code-workspace", br#"{"folders": [{"path": "src"}]}"#);

        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        let workspaces = scanner.scan().await.unwrap();

        assert_eq!(workspaces.len(), 2);
        assert_eq!(workspaces[0].title, "broken");
        assert!(workspaces[0].folders.is_empty());
        assert_eq!(workspaces[1].folders, vec!["src"]);
    }

    #[tokio::test]
    async fn test_scan_skips_unreadable_descriptor() {
        let dir = TempDir::new().unwrap();
        // Not UTF-8, so reading it as text fails
        touch(dir.path(), "binary.code-workspace", &[0xff, 0xfe, 0xfd]);
        touch(dir.path(), "ok.code-workspace", b"{}");

        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        let workspaces = scanner.scan().await.unwrap();

        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].title, "ok");
    }

    #[tokio::test]
    async fn test_scan_empty_root() {
        let dir = TempDir::new().unwrap();
        let scanner = Scanner::new(&walk_config(dir.path())).unwrap();
        assert!(scanner.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_missing_root_fails() {
        let scanner = Scanner::new(&walk_config(Path::new("/nonexistent/search/root"))).unwrap();
        let err = scanner.scan().await.unwrap_err();
        assert!(matches!(err, ScanError::Search { source: None, .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_search_stderr_fails() {
        let err = run_search("sh", &["-c", "echo /found/a.code-workspace; echo boom >&2"])
            .await
            .unwrap_err();
        match err {
            ScanError::Search { source, stderr } => {
                assert!(source.is_none());
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_search_stdout() {
        let stdout = run_search("sh", &["-c", "echo /found/a.code-workspace"])
            .await
            .unwrap();
        assert_eq!(stdout.trim(), "/found/a.code-workspace");
    }

    #[tokio::test]
    async fn test_run_search_missing_program() {
        let err = run_search("definitely-not-a-search-tool", &[]).await.unwrap_err();
        assert!(matches!(err, ScanError::Search { source: Some(_), .. }));
    }
}
