//! Browser-style persistence areas.
//!
//! The site keeps its verification state in two areas with the semantics of
//! the browser `Storage` API:
//!
//! | Area | Lifetime | Default implementation |
//! |------|----------|------------------------|
//! | durable | survives restarts | [`FileStore`] |
//! | volatile | one tab, cleared on close | [`MemoryStore`] |
//!
//! [`SessionStore`] layers the verification record on top of a pair of them.

mod file_store;
mod memory_store;
mod session_store;

use std::sync::Arc;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use session_store::SessionStore;

use crate::NolyxError;

/// A synchronous string key/value area.
///
/// Calls never suspend, so a read-modify-write made through one handle
/// cannot be interleaved by another task in the same tab.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, NolyxError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), NolyxError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), NolyxError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, NolyxError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), NolyxError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), NolyxError> {
        (**self).remove(key)
    }
}
