//! Shared setup for commands

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use code_workspaces::cache::Session;
use code_workspaces::config::Config;
use code_workspaces::storage::{FileStore, StateStore};
use code_workspaces::workspace::Scanner;

use super::host::TerminalHost;

/// Configuration and storage location for one invocation
pub struct Context {
    pub config: Config,
    pub storage_file: PathBuf,
}

impl Context {
    pub fn store(&self) -> StateStore<FileStore> {
        StateStore::new(FileStore::new(&self.storage_file), &self.config)
    }

    pub fn host(&self) -> TerminalHost {
        TerminalHost::new(self.config.favorite_color)
    }

    /// Activate a list session, rescanning if the cache is stale
    pub async fn session(&self) -> Result<Session<'_, FileStore>> {
        let scanner = Scanner::new(&self.config).context("Failed to set up workspace scanner")?;
        Session::activate(&self.config, self.store(), &scanner)
            .await
            .with_context(|| {
                format!(
                    "Failed to load workspaces (storage: {})",
                    self.storage_file.display()
                )
            })
    }
}
