//! List ordering and the host capability interface
//!
//! The list has two sections. "Recently Used" holds recent workspaces in
//! recency order. "Workspaces" holds everything else, favorites first, otherwise
//! in scan order. A workspace appears in exactly one section.

use std::io;
use std::path::Path;

use crate::config::{Config, EditorApp};
use crate::error::{Error, Result};
use crate::state::PersistedState;
use crate::workspace::Workspace;

pub const RECENT_SECTION: &str = "Recently Used";
pub const WORKSPACES_SECTION: &str = "Workspaces";
pub const SEARCH_PLACEHOLDER: &str = "Search for workspace...";

/// Workspaces split into the two list sections
#[derive(Debug, PartialEq, Eq)]
pub struct Sections<'a> {
    pub recent: Vec<&'a Workspace>,
    pub workspaces: Vec<&'a Workspace>,
}

impl<'a> Sections<'a> {
    pub fn new(state: &'a PersistedState) -> Self {
        let (mut recent, mut workspaces): (Vec<&Workspace>, Vec<&Workspace>) =
            state.items.iter().partition(|ws| state.is_recent(&ws.id));

        recent.sort_by_key(|ws| state.recents.iter().position(|r| *r == ws.id));
        workspaces.sort_by_key(|ws| !state.is_favorite(&ws.id));

        Self { recent, workspaces }
    }

    /// Keep only workspaces whose title contains `query`, ignoring case
    pub fn filter(mut self, query: &str) -> Self {
        let query = query.to_lowercase();
        if query.is_empty() {
            return self;
        }

        let matches = |ws: &&Workspace| ws.title.to_lowercase().contains(&query);
        self.recent.retain(matches);
        self.workspaces.retain(matches);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty() && self.workspaces.is_empty()
    }
}

/// One row as the host displays it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub path: String,
    /// Accessory icon shown on favorites
    pub accessory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub items: Vec<ListItem>,
}

/// Everything needed to render the workspace list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub search_placeholder: &'static str,
    pub sections: Vec<Section>,
}

impl ListView {
    pub fn new(state: &PersistedState, sections: &Sections<'_>, config: &Config) -> Self {
        let build = |items: &[&Workspace]| -> Vec<ListItem> {
            items
                .iter()
                .map(|ws| ListItem {
                    id: ws.id.clone(),
                    title: ws.title.clone(),
                    subtitle: ws.subtitle().to_string(),
                    path: ws.path.clone(),
                    accessory: state
                        .is_favorite(&ws.id)
                        .then(|| config.favorite_icon.clone()),
                })
                .collect()
        };

        Self {
            search_placeholder: SEARCH_PLACEHOLDER,
            sections: vec![
                Section {
                    title: RECENT_SECTION,
                    items: build(&sections.recent),
                },
                Section {
                    title: WORKSPACES_SECTION,
                    items: build(&sections.workspaces),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: String,
}

/// Capabilities the launcher host provides
///
/// The core only depends on the effect of these calls.
pub trait Host {
    fn render_list(&mut self, view: &ListView) -> io::Result<()>;

    /// Open `target` with an external application
    fn open_with(&mut self, app: &EditorApp, target: &Path) -> io::Result<()>;

    /// Open a path in the file manager
    fn open_path(&mut self, path: &Path) -> io::Result<()>;

    /// Show a file selected in the file manager
    fn reveal(&mut self, path: &Path) -> io::Result<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()>;

    fn notify(&mut self, toast: &Toast);

    /// Clear the search input and return to the root view
    fn reset_view(&mut self);
}

/// Find the workspace a user means by `query`
///
/// Tries an exact id, then an exact title, then a unique title substring
/// ignoring case.
pub fn resolve<'a>(items: &'a [Workspace], query: &str) -> Result<&'a Workspace> {
    if let Some(ws) = items.iter().find(|ws| ws.id == query) {
        return Ok(ws);
    }
    if let Some(ws) = items.iter().find(|ws| ws.title == query) {
        return Ok(ws);
    }

    let needle = query.to_lowercase();
    let mut matches = items
        .iter()
        .filter(|ws| ws.title.to_lowercase().contains(&needle));

    match (matches.next(), matches.next()) {
        (Some(ws), None) => Ok(ws),
        (None, _) => Err(Error::UnknownWorkspace(query.to_string())),
        (Some(first), Some(second)) => {
            let mut titles = vec![first.title.clone(), second.title.clone()];
            titles.extend(matches.map(|ws| ws.title.clone()));
            Err(Error::AmbiguousWorkspace {
                query: query.to_string(),
                matches: titles,
            })
        }
    }
}
