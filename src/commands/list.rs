//! List command - Show recent and other workspaces

use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;

use code_workspaces::presentation::Host;

use super::context::Context;
use super::utils;

/// Options for the list command
pub struct ListOptions {
    /// Only show workspaces whose title contains this
    pub query: Option<String>,
    /// Show workspace ID for each entry
    pub with_id: bool,
}

/// Execute the list command
pub async fn execute(ctx: &Context, options: ListOptions) -> Result<()> {
    let session = ctx.session().await?;
    let mut host = ctx.host();
    host.with_id = options.with_id;

    let query = options.query.as_deref().unwrap_or("");
    host.render_list(&session.view(query))
        .context("Failed to render workspace list")?;

    if let Some(saved_at) = session.state().saved_at {
        let note = if session.rescanned() {
            "just scanned"
        } else {
            "cached"
        };
        println!(
            "{}",
            format!("Last scan: {} ({})", utils::format_timestamp_ms(saved_at), note).dimmed()
        );
    }

    Ok(())
}
