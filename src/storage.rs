//! Durable key-value storage and the persisted-state store on top of it

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::config::Config;
use crate::error::StorageError;
use crate::state::PersistedState;

/// String key-value storage supplied by the host
pub trait KeyValueStore {
    /// The value stored under `key`, or `None` if it was never written
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, key: &str, value: String)
        -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Keys kept as one JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::Decode {
                    key: self.path.display().to_string(),
                    source,
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(entries).map_err(StorageError::Encode)?;

        // Write beside the target, then swap it in
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries).await
    }
}

/// Process-local storage, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Reads and writes [`PersistedState`] under the configured key
///
/// The only code path that touches durable storage.
#[derive(Debug)]
pub struct StateStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(backend: S, config: &Config) -> Self {
        Self {
            backend,
            key: config.storage_key.clone(),
        }
    }

    /// Load the stored state, or the empty default if nothing was stored
    pub async fn load(&self) -> Result<PersistedState, StorageError> {
        match self.backend.get(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Decode {
                key: self.key.clone(),
                source,
            }),
            None => Ok(PersistedState::default()),
        }
    }

    pub async fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state).map_err(StorageError::Encode)?;
        self.backend.set(&self.key, raw).await
    }
}
