//! Verification record persistence.

use crate::config::SessionConfig;
use crate::session::SessionRecord;
use crate::NolyxError;

use super::KeyValueStore;

const VOLATILE_MARKER: &str = "true";

/// Reads and writes the verification record across a durable and a volatile area.
///
/// The durable copy is authoritative. The volatile marker only mirrors
/// "the durable record was valid when last checked" and is never read to
/// decide validity.
pub struct SessionStore<D, V> {
    durable: D,
    volatile: V,
    durable_key: String,
    volatile_key: String,
}

impl<D: KeyValueStore, V: KeyValueStore> SessionStore<D, V> {
    /// Creates a store using the default keys.
    pub fn new(durable: D, volatile: V) -> Self {
        Self::with_config(durable, volatile, &SessionConfig::default())
    }

    /// Creates a store using the keys from `config`.
    pub fn with_config(durable: D, volatile: V, config: &SessionConfig) -> Self {
        Self {
            durable,
            volatile,
            durable_key: config.durable_key.clone(),
            volatile_key: config.volatile_key.clone(),
        }
    }

    /// Serializes `record` into the durable area and sets the volatile marker.
    ///
    /// # Errors
    ///
    /// Serialization and storage failures are returned as is.
    pub fn write(&self, record: &SessionRecord) -> Result<(), NolyxError> {
        let json = serde_json::to_string(record)
            .map_err(|e| NolyxError::SerializationError(e.to_string()))?;

        self.durable.set(&self.durable_key, &json)?;
        self.mark_volatile()
    }

    /// Reads the durable record.
    ///
    /// A record that fails to parse is erased and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns an error only when the storage area itself fails.
    pub fn read(&self) -> Result<Option<SessionRecord>, NolyxError> {
        let Some(raw) = self.durable.get(&self.durable_key)? else {
            return Ok(None);
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                log::warn!(
                    target: "nolyx",
                    "msg=\"malformed session record, clearing\", error=\"{e}\""
                );
                self.erase()?;
                Ok(None)
            }
        }
    }

    /// Reads the durable record without side effects.
    ///
    /// A record that fails to parse is reported as absent and left in place.
    pub fn peek(&self) -> Result<Option<SessionRecord>, NolyxError> {
        let Some(raw) = self.durable.get(&self.durable_key)? else {
            return Ok(None);
        };

        Ok(serde_json::from_str::<SessionRecord>(&raw).ok())
    }

    /// Removes the record and the marker. No-op when both are absent.
    pub fn erase(&self) -> Result<(), NolyxError> {
        self.durable.remove(&self.durable_key)?;
        self.volatile.remove(&self.volatile_key)
    }

    /// Sets the volatile marker.
    pub fn mark_volatile(&self) -> Result<(), NolyxError> {
        self.volatile.set(&self.volatile_key, VOLATILE_MARKER)
    }

    /// Returns true when the volatile marker is present.
    pub fn has_volatile_marker(&self) -> Result<bool, NolyxError> {
        Ok(self.volatile.get(&self.volatile_key)?.as_deref() == Some(VOLATILE_MARKER))
    }

    /// The durable area.
    pub fn durable(&self) -> &D {
        &self.durable
    }

    /// The volatile area.
    pub fn volatile(&self) -> &V {
        &self.volatile
    }
}
