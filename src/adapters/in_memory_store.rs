//! In-memory key-value store for testing.
//!
//! This adapter provides a pure in-memory implementation of KeyValueStore,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::KeyValueStore};

/// In-memory key-value store.
///
/// All clones share the same underlying map, so a test can hand one clone to
/// an engine and inspect the other.
///
/// # Examples
///
/// ```
/// use noughts::adapters::InMemoryKeyValueStore;
/// use noughts::ports::KeyValueStore;
///
/// let store = InMemoryKeyValueStore::new();
/// let view = store.clone();
/// store.set("k", "v")?;
/// assert!(view.contains("k"));
/// # Ok::<(), noughts::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    storage: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    // A panic while holding the lock cannot leave the map half-written.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::Storage {
                operation: "set".to_string(),
                message: "empty key".to_string(),
            });
        }
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}
