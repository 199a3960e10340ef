use crate::storage::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

/// In-memory key-value store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entries.read() {
            Ok(entries) => Ok(entries.get(key).cloned()),
            Err(e) => {
                error!(?e, key, "Failed to read entry");
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(key, bytes = value.len(), "Writing entry");
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Err(e) => {
                error!(?e, key, "Failed to write entry");
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(key, "Removing entry");
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(key);
                Ok(())
            }
            Err(e) => {
                error!(?e, key, "Failed to remove entry");
                Err(StorageError::Backend(e.to_string()))
            }
        }
    }
}
