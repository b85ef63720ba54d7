use crate::events::{Listener, SiteEvent};

/// Writes one `log` line per site event.
///
/// Routine events go out at the configured level. Expired sessions, failed
/// wallet connections and failed post loads are raised to at least `Warn`.
/// Wallet addresses are shortened.
///
/// ```rust,ignore
/// nolyx::register_event_listeners(|registry| {
///     registry.listen(LoggingListener::with_level(log::Level::Debug));
/// });
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Routine events at `Info`.
    pub fn new() -> Self {
        Self::with_level(log::Level::Info)
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    fn level_for(&self, event: &SiteEvent) -> log::Level {
        if event.is_failure() {
            self.level.min(log::Level::Warn)
        } else {
            self.level
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for LoggingListener {
    fn handle(&self, event: &SiteEvent) {
        log::log!(
            target: "nolyx::events",
            self.level_for(event),
            "event={}{}",
            event.name(),
            details(event)
        );
    }
}

fn details(event: &SiteEvent) -> String {
    match event {
        SiteEvent::SessionCreated { expires_at, .. }
        | SiteEvent::SessionExtended { expires_at, .. } => {
            format!(", expires_at={}", expires_at.to_rfc3339())
        }
        SiteEvent::SessionExpired { expired_at, .. } => {
            format!(", expired_at={}", expired_at.to_rfc3339())
        }
        SiteEvent::VerificationRequired { redirect_to, .. } => {
            format!(", redirect_to=\"{redirect_to}\"")
        }
        SiteEvent::WalletConnected { account, .. } => {
            format!(", account={}", crate::wallet::truncate_address(account))
        }
        SiteEvent::WalletAccountChanged { account, .. } => match account {
            Some(account) => format!(", account={}", crate::wallet::truncate_address(account)),
            None => ", account=none".to_owned(),
        },
        SiteEvent::WalletConnectFailed { code, reason, .. } => match code {
            Some(code) => format!(", code={code}, reason=\"{reason}\""),
            None => format!(", reason=\"{reason}\""),
        },
        SiteEvent::PostsLoaded { count, .. } => format!(", count={count}"),
        SiteEvent::PostsLoadFailed { reason, .. } => format!(", reason=\"{reason}\""),
        SiteEvent::SessionCleared { .. } | SiteEvent::WalletDisconnected { .. } => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_failures_raised_to_warn() {
        let listener = LoggingListener::with_level(log::Level::Debug);
        let now = Utc::now();

        let failed = SiteEvent::PostsLoadFailed {
            reason: "HTTP status 503".to_owned(),
            at: now,
        };
        let loaded = SiteEvent::PostsLoaded { count: 4, at: now };

        assert_eq!(listener.level_for(&failed), log::Level::Warn);
        assert_eq!(listener.level_for(&loaded), log::Level::Debug);
    }

    #[test]
    fn test_error_level_is_kept_for_failures() {
        let listener = LoggingListener::with_level(log::Level::Error);
        let event = SiteEvent::SessionExpired {
            expired_at: Utc::now(),
            at: Utc::now(),
        };

        assert_eq!(listener.level_for(&event), log::Level::Error);
    }

    #[test]
    fn test_details_shorten_accounts() {
        let event = SiteEvent::WalletConnected {
            account: "0x52908400098527886E0F7030069857D2E4169EE7".to_owned(),
            at: Utc::now(),
        };

        assert_eq!(details(&event), ", account=0x5290...9EE7");
    }

    #[test]
    fn test_details_connect_failure() {
        let event = SiteEvent::WalletConnectFailed {
            code: Some(4001),
            reason: "rejected".to_owned(),
            at: Utc::now(),
        };

        assert_eq!(details(&event), ", code=4001, reason=\"rejected\"");
        assert_eq!(details(&SiteEvent::SessionCleared { at: Utc::now() }), "");
    }

    #[test]
    fn test_handle() {
        let listener = LoggingListener::default();

        // should not panic
        listener.handle(&SiteEvent::WalletDisconnected { at: Utc::now() });
    }
}
