//! Persisted workspace list and user state

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::workspace::Workspace;

/// Everything kept between sessions
///
/// Missing fields deserialize to their defaults, so any stored subset loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    /// Last successful scan, in scan order
    pub items: Vec<Workspace>,
    /// Favorited workspace ids, in the order they were added
    pub favorites: Vec<String>,
    /// Recently opened workspace ids, most recent first
    pub recents: Vec<String>,
    /// Milliseconds since the Unix epoch of the last successful scan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<i64>,
}

impl PersistedState {
    /// Whether the cached scan must be redone at `now_ms`
    ///
    /// A cache that was never stamped, is at least `ttl` old, or was stamped
    /// in the future is stale.
    pub fn is_stale(&self, now_ms: i64, ttl: Duration) -> bool {
        let Some(saved_at) = self.saved_at else {
            return true;
        };

        let elapsed = now_ms - saved_at;
        elapsed < 0 || elapsed as u128 >= ttl.as_millis()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    pub fn is_recent(&self, id: &str) -> bool {
        self.recents.iter().any(|r| r == id)
    }

    /// Add or remove `id` from favorites, returning whether it is now a favorite
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        match self.favorites.iter().position(|f| f == id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(id.to_string());
                true
            }
        }
    }

    /// Move `id` to the front of recents, keeping at most `max_recents`
    pub fn mark_recent(&mut self, id: &str, max_recents: usize) {
        self.recents.retain(|r| r != id);
        self.recents.insert(0, id.to_string());
        self.recents.truncate(max_recents);
    }

    /// Replace the scan result, stamping it with `now_ms`
    pub fn merge_scan(&mut self, items: Vec<Workspace>, now_ms: i64, max_recents: usize) {
        self.recents.truncate(max_recents);
        self.items = items;
        self.saved_at = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(600);

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_is_empty() {
        let state = PersistedState::default();
        assert!(state.items.is_empty());
        assert!(state.favorites.is_empty());
        assert!(state.recents.is_empty());
        assert_eq!(state.saved_at, None);
    }

    #[test]
    fn test_never_saved_is_stale() {
        assert!(PersistedState::default().is_stale(0, TTL));
    }

    #[test]
    fn test_staleness_boundary() {
        let state = PersistedState {
            saved_at: Some(1_000),
            ..Default::default()
        };
        assert!(!state.is_stale(1_000, TTL));
        assert!(!state.is_stale(1_000 + 599_999, TTL));
        assert!(state.is_stale(1_000 + 600_000, TTL));
    }

    #[test]
    fn test_future_stamp_is_stale() {
        let state = PersistedState {
            saved_at: Some(10_000),
            ..Default::default()
        };
        assert!(state.is_stale(9_999, TTL));
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let mut state = PersistedState {
            favorites: ids(&["a", "b", "c"]),
            ..Default::default()
        };

        assert!(!state.toggle_favorite("b"));
        assert_eq!(state.favorites, ids(&["a", "c"]));

        assert!(state.toggle_favorite("b"));
        assert_eq!(state.favorites, ids(&["a", "c", "b"]));

        assert!(state.toggle_favorite("d"));
        assert!(!state.toggle_favorite("d"));
        assert_eq!(state.favorites, ids(&["a", "c", "b"]));
    }

    #[test]
    fn test_mark_recent_moves_to_front() {
        let mut state = PersistedState {
            recents: ids(&["a", "b", "c"]),
            ..Default::default()
        };
        state.mark_recent("c", 3);
        assert_eq!(state.recents, ids(&["c", "a", "b"]));

        state.mark_recent("d", 3);
        assert_eq!(state.recents, ids(&["d", "c", "a"]));
    }

    #[test]
    fn test_mark_recent_idempotent() {
        let mut once = PersistedState {
            recents: ids(&["a", "b"]),
            ..Default::default()
        };
        let mut twice = once.clone();

        once.mark_recent("b", 3);
        twice.mark_recent("b", 3);
        twice.mark_recent("b", 3);

        assert_eq!(once.recents, twice.recents);
        assert_eq!(once.recents, ids(&["b", "a"]));
    }

    #[test]
    fn test_mark_recent_bounded() {
        let mut state = PersistedState::default();
        for id in ["a", "b", "c", "d", "e"] {
            state.mark_recent(id, 3);
            assert!(state.recents.len() <= 3);
        }
        assert_eq!(state.recents, ids(&["e", "d", "c"]));
    }

    #[test]
    fn test_merge_scan() {
        let mut state = PersistedState {
            favorites: ids(&["f"]),
            recents: ids(&["a", "b", "c", "d"]),
            ..Default::default()
        };
        state.merge_scan(Vec::new(), 42, 3);

        assert_eq!(state.recents, ids(&["a", "b", "c"]));
        assert_eq!(state.favorites, ids(&["f"]));
        assert_eq!(state.saved_at, Some(42));
    }

    #[test]
    fn test_deserialize_partial() {
        let state: PersistedState = serde_json::from_str(r#"{"favorites": ["x"]}"#).unwrap();
        assert_eq!(state.favorites, ids(&["x"]));
        assert!(state.items.is_empty());
        assert_eq!(state.saved_at, None);
    }

    #[test]
    fn test_serialize_field_names() {
        let state = PersistedState {
            saved_at: Some(5),
            ..Default::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"items":[],"favorites":[],"recents":[],"savedAt":5}"#
        );

        let unsaved = serde_json::to_string(&PersistedState::default()).unwrap();
        assert!(!unsaved.contains("savedAt"));
    }
}
