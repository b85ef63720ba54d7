//! In-memory key/value area.
//!
//! Plays the per-tab store in hosts and both stores in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::NolyxError;

use super::KeyValueStore;

/// In-memory storage area.
///
/// Stores entries in a `HashMap` protected by a `RwLock`. Clones share the
/// same entries, the way two scripts in one tab see the same storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, NolyxError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| NolyxError::StorageError("Lock poisoned".to_owned()))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), NolyxError> {
        self.entries
            .write()
            .map_err(|_| NolyxError::StorageError("Lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), NolyxError> {
        self.entries
            .write()
            .map_err(|_| NolyxError::StorageError("Lock poisoned".to_owned()))?
            .remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set("nolyxVerified", "true").unwrap();

        assert_eq!(
            store.get("nolyxVerified").unwrap(),
            Some("true".to_owned())
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("key", "one").unwrap();
        store.set("key", "two").unwrap();

        assert_eq!(store.get("key").unwrap(), Some("two".to_owned()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("key", "value").unwrap();

        store.remove("key").unwrap();
        store.remove("key").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("key", "value").unwrap();
        assert_eq!(other.get("key").unwrap(), Some("value".to_owned()));
    }
}
