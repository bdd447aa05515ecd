//! Open, reveal and copy commands for a single workspace

use anyhow::{Context as _, Result};

use code_workspaces::actions;

use super::context::Context;

/// What to do with the selected workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Workspace file in the editor
    Editor,
    /// First project folder in the file manager
    ProjectFolder,
    /// Workspace file selected in the file manager
    Reveal,
    /// Workspace file path to the clipboard
    CopyPath,
}

impl Target {
    fn verb(self) -> &'static str {
        match self {
            Self::Editor => "open",
            Self::ProjectFolder => "open the project folder of",
            Self::Reveal => "reveal",
            Self::CopyPath => "copy the path of",
        }
    }
}

/// Execute an open-style command
pub async fn execute(ctx: &Context, workspace: &str, target: Target) -> Result<()> {
    let mut session = ctx.session().await?;
    let mut host = ctx.host();

    let result = match target {
        Target::Editor => actions::open_in_editor(&mut session, &mut host, workspace).await,
        Target::ProjectFolder => actions::open_project_folder(&session, &mut host, workspace),
        Target::Reveal => actions::reveal_workspace_file(&session, &mut host, workspace),
        Target::CopyPath => actions::copy_workspace_path(&session, &mut host, workspace),
    };

    result.with_context(|| format!("Failed to {} workspace '{}'", target.verb(), workspace))
}
