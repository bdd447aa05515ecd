//! code-workspaces: search, open and favorite VS Code workspaces from the terminal

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use code_workspaces::config::{self, Config};
use code_workspaces::workspace::SearchBackend;

mod commands;

use commands::context::Context;
use commands::open::Target;

#[derive(Parser)]
#[command(name = "code-workspaces")]
#[command(about = "Search, open and favorite VS Code workspaces", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: ConfigArgs,

    /// Log scan and cache decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the built-in configuration
#[derive(Args)]
struct ConfigArgs {
    /// Directory to search (default: home directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Workspace file extension
    #[arg(long, global = true, default_value = config::FILE_EXT)]
    ext: String,

    /// Skip paths containing this fragment (repeatable; default: /vendor, /node_modules)
    #[arg(long = "skip", global = true)]
    skip: Vec<String>,

    /// Seconds a scan result is reused before rescanning
    #[arg(long, global = true)]
    ttl: Option<u64>,

    /// Number of recently opened workspaces to keep
    #[arg(long, global = true, default_value_t = config::MAX_RECENTS)]
    max_recents: usize,

    /// Storage file (default: platform data directory)
    #[arg(long, global = true)]
    storage_file: Option<PathBuf>,

    /// Key the state is stored under
    #[arg(long, global = true, default_value = config::STORAGE_KEY)]
    storage_key: String,

    /// How to search the filesystem
    #[arg(long, global = true, value_enum)]
    backend: Option<SearchBackend>,

    /// Editor application name (used with `open -a` on macOS)
    #[arg(long, global = true)]
    editor_name: Option<String>,

    /// Editor command (used on other platforms)
    #[arg(long, global = true)]
    editor_command: Option<String>,
}

impl ConfigArgs {
    fn into_context(self) -> Result<Context> {
        let mut config = match self.root {
            Some(root) => Config::new(root),
            None => Config::for_home()?,
        };

        config.file_ext = self.ext;
        if !self.skip.is_empty() {
            config.skip_dirs = self.skip;
        }
        if let Some(secs) = self.ttl {
            config.ttl = Duration::from_secs(secs);
        }
        config.max_recents = self.max_recents;
        config.storage_key = self.storage_key;
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(name) = self.editor_name {
            config.editor.name = name;
        }
        if let Some(command) = self.editor_command {
            config.editor.command = command;
        }

        let storage_file = match self.storage_file {
            Some(path) => path,
            None => config::storage_file()?,
        };

        Ok(Context {
            config,
            storage_file,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List workspaces, recently used first
    List {
        /// Only show workspaces whose title contains this
        query: Option<String>,

        /// Show workspace ID for each entry
        #[arg(long)]
        with_id: bool,
    },

    /// Open a workspace in the editor
    Open {
        /// Workspace ID, title, or unique part of a title
        workspace: String,
    },

    /// Open a workspace's project folder in the file manager
    OpenFolder {
        /// Workspace ID, title, or unique part of a title
        workspace: String,
    },

    /// Reveal a workspace file in the file manager
    Reveal {
        /// Workspace ID, title, or unique part of a title
        workspace: String,
    },

    /// Copy a workspace file path to the clipboard
    CopyPath {
        /// Workspace ID, title, or unique part of a title
        workspace: String,
    },

    /// Mark or unmark a workspace as favorite
    Favorite {
        /// Workspace ID, title, or unique part of a title
        workspace: String,
    },

    /// Rescan on the next list, keeping favorites and recents
    Refresh,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = cli.options.into_context()?;

    match cli.command {
        Commands::List { query, with_id } => {
            let options = commands::list::ListOptions { query, with_id };
            commands::list::execute(&ctx, options).await?;
        }

        Commands::Open { workspace } => {
            commands::open::execute(&ctx, &workspace, Target::Editor).await?;
        }

        Commands::OpenFolder { workspace } => {
            commands::open::execute(&ctx, &workspace, Target::ProjectFolder).await?;
        }

        Commands::Reveal { workspace } => {
            commands::open::execute(&ctx, &workspace, Target::Reveal).await?;
        }

        Commands::CopyPath { workspace } => {
            commands::open::execute(&ctx, &workspace, Target::CopyPath).await?;
        }

        Commands::Favorite { workspace } => {
            commands::favorite::execute(&ctx, &workspace).await?;
        }

        Commands::Refresh => {
            commands::refresh::execute(&ctx).await?;
        }
    }

    Ok(())
}
