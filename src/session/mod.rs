//! Verification sessions.
//!
//! A visitor who passes the CAPTCHA gets a [`SessionRecord`] in durable
//! storage. Protected pages ask the [`SessionManager`] whether that record is
//! still valid and bounce the visitor to the verification page when it is not.
//!
//! The gate is a client-side speed bump: anyone able to write the storage
//! area can forge a record. No server-side enforcement backs it.

mod manager;
mod monitor;
mod navigator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use manager::SessionManager;
pub use monitor::{MonitorHandle, PageVisibility, SessionMonitor};
pub use navigator::Navigator;
#[cfg(any(test, feature = "mocks"))]
pub use navigator::RecordingNavigator;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_MINUTE: i64 = 60 * 1000;

/// The persisted verification record.
///
/// Serialized as
/// `{"verified":true,"timestamp":<ms>,"expires":<ms>,"userAgent":"...","ip":null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub verified: bool,

    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "expires", with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,

    /// Browser user agent. Recorded, never checked.
    #[serde(rename = "userAgent", default)]
    pub client_fingerprint: String,

    /// Always null; the client cannot learn its own address.
    #[serde(default)]
    pub ip: Option<String>,
}

impl SessionRecord {
    /// A verified record starting at `now` and lasting `lifetime`.
    pub fn new(
        client_fingerprint: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: chrono::Duration,
    ) -> Self {
        Self {
            verified: true,
            created_at: now,
            expires_at: now + lifetime,
            client_fingerprint: client_fingerprint.into(),
            ip: None,
        }
    }

    /// True iff verified and `now` is before expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.verified && now < self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }
}

/// A record plus the time remaining on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionInfo {
    #[serde(flatten)]
    pub record: SessionRecord,

    #[serde(rename = "timeLeft")]
    pub time_left_ms: i64,

    #[serde(rename = "hoursLeft")]
    pub hours_left: i64,

    #[serde(rename = "minutesLeft")]
    pub minutes_left: i64,

    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl SessionInfo {
    /// Derives the remaining-time fields at `now`.
    ///
    /// Hours and minutes are floored, so an expired record reports negative values.
    pub fn at(record: SessionRecord, now: DateTime<Utc>) -> Self {
        let time_left_ms = (record.expires_at - now).num_milliseconds();

        Self {
            record,
            time_left_ms,
            hours_left: time_left_ms.div_euclid(MS_PER_HOUR),
            minutes_left: (time_left_ms % MS_PER_HOUR).div_euclid(MS_PER_MINUTE),
            is_valid: time_left_ms > 0,
        }
    }
}

/// Where a session stands, as last observed.
///
/// `Expired` is only ever observed: the next validity check erases the record
/// and the state becomes `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Valid,
    Expired,
}
