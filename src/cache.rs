//! Cache orchestrator
//!
//! Each list activation loads the persisted state and decides whether the
//! cached scan can be reused. A stale cache is rescanned, merged with the
//! existing favorites and recents, saved, then presented.

use chrono::Utc;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, StorageError};
use crate::presentation::{resolve, Host, ListView, Sections, Toast, ToastStyle};
use crate::state::PersistedState;
use crate::storage::{KeyValueStore, StateStore};
use crate::workspace::{Scanner, Workspace};

/// One list-display session, owning the in-memory state
pub struct Session<'c, S> {
    config: &'c Config,
    store: StateStore<S>,
    state: PersistedState,
    rescanned: bool,
}

impl<'c, S: KeyValueStore> Session<'c, S> {
    /// Load the state, rescanning if the cache is stale
    pub async fn activate(
        config: &'c Config,
        store: StateStore<S>,
        scanner: &Scanner,
    ) -> Result<Self> {
        Self::activate_at(config, store, scanner, Utc::now().timestamp_millis()).await
    }

    /// [`Session::activate`] with an explicit clock reading
    pub async fn activate_at(
        config: &'c Config,
        store: StateStore<S>,
        scanner: &Scanner,
        now_ms: i64,
    ) -> Result<Self> {
        let mut state = store.load().await?;
        let rescanned = state.is_stale(now_ms, config.ttl);

        if rescanned {
            info!("Workspace cache is stale, rescanning");
            let items = scanner.scan().await?;
            state.merge_scan(items, now_ms, config.max_recents);
            store.save(&state).await?;
            info!(count = state.items.len(), "Fetched and saved workspaces");
        } else {
            info!(count = state.items.len(), "Using cached workspaces");
        }

        Ok(Self {
            config,
            store,
            state,
            rescanned,
        })
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Whether activation ran a fresh scan
    pub fn rescanned(&self) -> bool {
        self.rescanned
    }

    pub fn sections(&self) -> Sections<'_> {
        Sections::new(&self.state)
    }

    /// The list view for `query`, ready for the host
    pub fn view(&self, query: &str) -> ListView {
        ListView::new(&self.state, &self.sections().filter(query), self.config)
    }

    pub fn resolve(&self, query: &str) -> Result<&Workspace> {
        resolve(&self.state.items, query)
    }

    /// Flip favorite membership and persist, returning the new membership
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool, StorageError> {
        let favorited = self.state.toggle_favorite(id);
        self.store.save(&self.state).await?;
        Ok(favorited)
    }

    /// Record `id` as the most recently opened workspace and persist
    pub async fn mark_recent(&mut self, id: &str) -> Result<(), StorageError> {
        self.state.mark_recent(id, self.config.max_recents);
        self.store.save(&self.state).await
    }
}

/// Make the next activation rescan, keeping favorites and recents
pub async fn force_refresh<S: KeyValueStore, H: Host>(
    store: &StateStore<S>,
    host: &mut H,
) -> Result<(), StorageError> {
    let mut state = store.load().await?;
    state.saved_at = None;
    store.save(&state).await?;

    host.reset_view();
    host.notify(&Toast {
        style: ToastStyle::Success,
        title: "Force Refresh Workspaces".to_string(),
        message: "Force refresh will happen on next workspace list load!".to_string(),
    });
    Ok(())
}
