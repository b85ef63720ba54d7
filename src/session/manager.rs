use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::config::SessionConfig;
use crate::events::{dispatch, SiteEvent};
use crate::storage::{KeyValueStore, SessionStore};
use crate::NolyxError;

use super::{Navigator, SessionInfo, SessionRecord, SessionState};

/// Owns the rules for creating, checking, extending and clearing the
/// verification session.
///
/// Pages receive the manager explicitly (usually behind an `Arc`) and call
/// [`require_verification`](Self::require_verification) on mount.
///
/// Validity checks are not read-only: a failing check erases the stale
/// record, so the next check is cheap and sees `Absent`.
pub struct SessionManager<D, V> {
    store: SessionStore<D, V>,
    config: SessionConfig,
    navigator: Arc<dyn Navigator>,
}

impl<D: KeyValueStore, V: KeyValueStore> SessionManager<D, V> {
    /// Creates a manager over `store`, sending unverified visitors through `navigator`.
    pub fn new(
        store: SessionStore<D, V>,
        config: SessionConfig,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            config,
            navigator,
        }
    }

    /// Creates a manager with default keys and timings.
    pub fn with_defaults(durable: D, volatile: V, navigator: Arc<dyn Navigator>) -> Self {
        let config = SessionConfig::default();
        let store = SessionStore::with_config(durable, volatile, &config);
        Self::new(store, config, navigator)
    }

    /// Records a fresh verification for the browser identified by `user_agent`.
    ///
    /// Any existing record is overwritten; re-verifying always restarts the clock.
    ///
    /// # Returns
    ///
    /// - `Ok(record)` - the stored record
    /// - `Err(_)` - serialization or storage failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.create", skip_all, err)
    )]
    pub fn create_session(&self, user_agent: &str) -> Result<SessionRecord, NolyxError> {
        let now = Utc::now();
        let record = SessionRecord::new(user_agent, now, self.config.session_lifetime);

        self.store.write(&record)?;

        dispatch(SiteEvent::SessionCreated {
            expires_at: record.expires_at,
            at: now,
        });

        log::info!(
            target: "nolyx",
            "msg=\"verification session created\", expires_at={}",
            record.expires_at.to_rfc3339()
        );

        Ok(record)
    }

    /// Returns true when a verified, unexpired record exists.
    ///
    /// On success the volatile marker is rewritten if it went missing. An
    /// expired, unverified or unreadable record is erased.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "session.is_valid", skip_all))]
    pub fn is_valid(&self) -> bool {
        let now = Utc::now();

        match self.store.read() {
            Ok(None) => false,
            Ok(Some(record)) if record.is_valid_at(now) => {
                self.heal_volatile_marker();
                true
            }
            Ok(Some(record)) => {
                self.erase_quietly();

                dispatch(SiteEvent::SessionExpired {
                    expired_at: record.expires_at,
                    at: now,
                });

                log::info!(
                    target: "nolyx",
                    "msg=\"verification session expired\", verified={}, expired_at={}",
                    record.verified,
                    record.expires_at.to_rfc3339()
                );

                false
            }
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"session check failed\", error=\"{e}\""
                );
                self.erase_quietly();
                false
            }
        }
    }

    /// Returns the record with its remaining time, or `None` without a record.
    ///
    /// Purely observational: expired records are reported, not erased.
    pub fn get_info(&self) -> Option<SessionInfo> {
        match self.store.peek() {
            Ok(record) => record.map(|record| SessionInfo::at(record, Utc::now())),
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"session info unavailable\", error=\"{e}\""
                );
                None
            }
        }
    }

    /// Removes the record and marker. No-op when already absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "session.clear", skip_all))]
    pub fn clear_session(&self) {
        self.erase_quietly();

        dispatch(SiteEvent::SessionCleared { at: Utc::now() });

        log::info!(target: "nolyx", "msg=\"verification session cleared\"");
    }

    /// Gate for protected pages.
    ///
    /// Without a valid session, navigates to `redirect_to` (default: the
    /// configured verification page) and returns false.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.require_verification", skip(self))
    )]
    pub fn require_verification(&self, redirect_to: Option<&str>) -> bool {
        if self.is_valid() {
            return true;
        }

        let target = redirect_to.unwrap_or(self.config.verification_path.as_str());

        log::info!(
            target: "nolyx",
            "msg=\"no valid verification session, redirecting\", target=\"{target}\""
        );

        dispatch(SiteEvent::VerificationRequired {
            redirect_to: target.to_owned(),
            at: Utc::now(),
        });

        self.navigator.navigate(target);
        false
    }

    /// Pushes expiry to `now + hours` (default: the configured extension).
    ///
    /// The new expiry replaces the remaining time rather than adding to it.
    /// `created_at` is kept. Returns false when there is no record to extend.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "session.extend", skip(self))
    )]
    pub fn extend_session(&self, hours: Option<i64>) -> bool {
        let extension = match hours {
            None => self.config.extension,
            Some(hours) => match Duration::try_hours(hours) {
                Some(extension) => extension,
                None => {
                    log::warn!(
                        target: "nolyx",
                        "msg=\"session extend rejected, duration out of range\", hours={hours}"
                    );
                    return false;
                }
            },
        };

        let mut record = match self.store.peek() {
            Ok(Some(record)) => record,
            Ok(None) => return false,
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"session extend failed\", error=\"{e}\""
                );
                return false;
            }
        };

        let now = Utc::now();
        let Some(expires_at) = now.checked_add_signed(extension) else {
            log::warn!(
                target: "nolyx",
                "msg=\"session extend rejected, expiry out of range\", hours={}",
                extension.num_hours()
            );
            return false;
        };
        record.expires_at = expires_at;

        if let Err(e) = self.store.write(&record) {
            log::error!(
                target: "nolyx",
                "msg=\"session extend failed\", error=\"{e}\""
            );
            return false;
        }

        dispatch(SiteEvent::SessionExtended {
            expires_at: record.expires_at,
            at: now,
        });

        log::info!(
            target: "nolyx",
            "msg=\"verification session extended\", hours={}",
            extension.num_hours()
        );

        true
    }

    /// True when a record exists with less than the configured threshold left.
    pub fn is_expiring_soon(&self) -> bool {
        self.get_info().is_some_and(|info| {
            info.time_left_ms < self.config.expiring_soon_threshold.num_milliseconds()
        })
    }

    /// Classifies the stored record without touching it.
    pub fn state(&self) -> SessionState {
        match self.store.peek() {
            Ok(Some(record)) if record.is_valid_at(Utc::now()) => SessionState::Valid,
            Ok(Some(_)) => SessionState::Expired,
            Ok(None) | Err(_) => SessionState::Absent,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &SessionStore<D, V> {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn heal_volatile_marker(&self) {
        let present = self.store.has_volatile_marker().unwrap_or(false);
        if !present {
            if let Err(e) = self.store.mark_volatile() {
                log::warn!(
                    target: "nolyx",
                    "msg=\"could not restore volatile marker\", error=\"{e}\""
                );
            }
        }
    }

    fn erase_quietly(&self) {
        if let Err(e) = self.store.erase() {
            log::error!(
                target: "nolyx",
                "msg=\"session erase failed\", error=\"{e}\""
            );
        }
    }
}
