//! Interaction handlers for a selected workspace

use std::path::Path;

use crate::cache::Session;
use crate::error::{Error, Result};
use crate::presentation::Host;
use crate::storage::KeyValueStore;

/// Open the workspace file in the editor and record it as recent
pub async fn open_in_editor<S: KeyValueStore, H: Host>(
    session: &mut Session<'_, S>,
    host: &mut H,
    query: &str,
) -> Result<()> {
    let ws = session.resolve(query)?;
    let id = ws.id.clone();

    host.open_with(&session.config().editor, Path::new(&ws.path))?;
    session.mark_recent(&id).await?;
    host.reset_view();
    Ok(())
}

/// Open the workspace's first project folder in the file manager
pub fn open_project_folder<S: KeyValueStore, H: Host>(
    session: &Session<'_, S>,
    host: &mut H,
    query: &str,
) -> Result<()> {
    let ws = session.resolve(query)?;
    let folder = ws
        .project_folder()
        .ok_or_else(|| Error::NoProjectFolder(ws.title.clone()))?;

    host.open_path(&folder)?;
    host.reset_view();
    Ok(())
}

/// Flip the favorite flag, returning whether the workspace is now a favorite
pub async fn toggle_favorite<S: KeyValueStore>(
    session: &mut Session<'_, S>,
    query: &str,
) -> Result<bool> {
    let id = session.resolve(query)?.id.clone();
    Ok(session.toggle_favorite(&id).await?)
}

/// Select the workspace file in the file manager
pub fn reveal_workspace_file<S: KeyValueStore, H: Host>(
    session: &Session<'_, S>,
    host: &mut H,
    query: &str,
) -> Result<()> {
    let ws = session.resolve(query)?;
    host.reveal(Path::new(&ws.path))?;
    Ok(())
}

pub fn copy_workspace_path<S: KeyValueStore, H: Host>(
    session: &Session<'_, S>,
    host: &mut H,
    query: &str,
) -> Result<()> {
    let ws = session.resolve(query)?;
    host.copy_to_clipboard(&ws.path)?;
    Ok(())
}
