//! Favorite command - Toggle a workspace's favorite flag

use anyhow::Result;
use owo_colors::OwoColorize;

use code_workspaces::actions;

use super::context::Context;

/// Execute the favorite command
pub async fn execute(ctx: &Context, workspace: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    let title = session.resolve(workspace)?.title.clone();

    if actions::toggle_favorite(&mut session, workspace).await? {
        println!("{} {}", "Marked as favorite:".green(), title);
    } else {
        println!("{} {}", "Removed from favorites:".yellow(), title);
    }

    Ok(())
}
