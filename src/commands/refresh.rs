//! Refresh command - Force a rescan on the next list load

use anyhow::{Context as _, Result};

use code_workspaces::cache;

use super::context::Context;

/// Execute the refresh command
pub async fn execute(ctx: &Context) -> Result<()> {
    let mut host = ctx.host();
    cache::force_refresh(&ctx.store(), &mut host)
        .await
        .with_context(|| format!("Failed to update {}", ctx.storage_file.display()))
}
