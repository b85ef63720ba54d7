//! File-backed key/value area.
//!
//! Each key is stored as a file named after it in the configured directory.
//! This is the durable area: its contents survive a restart of the host.

use std::path::PathBuf;

use crate::NolyxError;

use super::KeyValueStore;

/// File-backed storage area.
///
/// # Example
///
/// ```rust,ignore
/// use nolyx::storage::FileStore;
///
/// let durable = FileStore::new("/var/lib/nolyx/storage")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Creates a new file store.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, NolyxError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            NolyxError::StorageError(format!("Failed to create storage directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    /// Returns the path for a key, or `None` if the key could escape the directory.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        let allowed = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        allowed.then(|| self.directory.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, NolyxError> {
        let Some(path) = self.key_path(key) else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| NolyxError::StorageError(format!("Failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), NolyxError> {
        let path = self
            .key_path(key)
            .ok_or_else(|| NolyxError::StorageError(format!("Invalid storage key: {key}")))?;

        std::fs::write(&path, value)
            .map_err(|e| NolyxError::StorageError(format!("Failed to write {key}: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), NolyxError> {
        let Some(path) = self.key_path(key) else {
            return Ok(());
        };

        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| NolyxError::StorageError(format!("Failed to delete {key}: {e}")))?;
        }

        Ok(())
    }
}
