use chrono::{DateTime, Utc};

/// The part of the site an event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventArea {
    Session,
    Wallet,
    Blog,
}

/// Events emitted by session, wallet and blog operations.
#[derive(Debug, Clone)]
pub enum SiteEvent {
    // verification session
    SessionCreated {
        expires_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SessionExtended {
        expires_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    SessionCleared {
        at: DateTime<Utc>,
    },
    SessionExpired {
        expired_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    VerificationRequired {
        redirect_to: String,
        at: DateTime<Utc>,
    },

    // wallet
    WalletConnected {
        account: String,
        at: DateTime<Utc>,
    },
    WalletDisconnected {
        at: DateTime<Utc>,
    },
    WalletAccountChanged {
        account: Option<String>,
        at: DateTime<Utc>,
    },
    WalletConnectFailed {
        code: Option<i64>,
        reason: String,
        at: DateTime<Utc>,
    },

    // blog
    PostsLoaded {
        count: usize,
        at: DateTime<Utc>,
    },
    PostsLoadFailed {
        reason: String,
        at: DateTime<Utc>,
    },
}

impl SiteEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionCreated { .. } => "session.created",
            Self::SessionExtended { .. } => "session.extended",
            Self::SessionCleared { .. } => "session.cleared",
            Self::SessionExpired { .. } => "session.expired",
            Self::VerificationRequired { .. } => "session.verification_required",
            Self::WalletConnected { .. } => "wallet.connected",
            Self::WalletDisconnected { .. } => "wallet.disconnected",
            Self::WalletAccountChanged { .. } => "wallet.account_changed",
            Self::WalletConnectFailed { .. } => "wallet.connect_failed",
            Self::PostsLoaded { .. } => "blog.posts_loaded",
            Self::PostsLoadFailed { .. } => "blog.posts_load_failed",
        }
    }

    pub fn area(&self) -> EventArea {
        match self {
            Self::SessionCreated { .. }
            | Self::SessionExtended { .. }
            | Self::SessionCleared { .. }
            | Self::SessionExpired { .. }
            | Self::VerificationRequired { .. } => EventArea::Session,
            Self::WalletConnected { .. }
            | Self::WalletDisconnected { .. }
            | Self::WalletAccountChanged { .. }
            | Self::WalletConnectFailed { .. } => EventArea::Wallet,
            Self::PostsLoaded { .. } | Self::PostsLoadFailed { .. } => EventArea::Blog,
        }
    }

    /// Something went wrong or access was lost.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired { .. }
                | Self::WalletConnectFailed { .. }
                | Self::PostsLoadFailed { .. }
        )
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SessionCreated { at, .. }
            | Self::SessionExtended { at, .. }
            | Self::SessionCleared { at }
            | Self::SessionExpired { at, .. }
            | Self::VerificationRequired { at, .. }
            | Self::WalletConnected { at, .. }
            | Self::WalletDisconnected { at }
            | Self::WalletAccountChanged { at, .. }
            | Self::WalletConnectFailed { at, .. }
            | Self::PostsLoaded { at, .. }
            | Self::PostsLoadFailed { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            SiteEvent::SessionCreated {
                expires_at: now,
                at: now
            }
            .name(),
            "session.created"
        );
        assert_eq!(SiteEvent::SessionCleared { at: now }.name(), "session.cleared");
        assert_eq!(
            SiteEvent::VerificationRequired {
                redirect_to: "/verif".to_owned(),
                at: now
            }
            .name(),
            "session.verification_required"
        );
        assert_eq!(
            SiteEvent::WalletConnectFailed {
                code: Some(4001),
                reason: "rejected".to_owned(),
                at: now
            }
            .name(),
            "wallet.connect_failed"
        );
        assert_eq!(
            SiteEvent::PostsLoaded { count: 3, at: now }.name(),
            "blog.posts_loaded"
        );
    }

    #[test]
    fn test_event_area() {
        let now = Utc::now();

        assert_eq!(
            SiteEvent::VerificationRequired {
                redirect_to: "/verif".to_owned(),
                at: now
            }
            .area(),
            EventArea::Session
        );
        assert_eq!(
            SiteEvent::WalletDisconnected { at: now }.area(),
            EventArea::Wallet
        );
        assert_eq!(
            SiteEvent::PostsLoaded { count: 0, at: now }.area(),
            EventArea::Blog
        );
    }

    #[test]
    fn test_event_is_failure() {
        let now = Utc::now();

        assert!(SiteEvent::SessionExpired {
            expired_at: now,
            at: now
        }
        .is_failure());
        assert!(!SiteEvent::SessionCleared { at: now }.is_failure());
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = SiteEvent::WalletDisconnected { at: now };

        assert_eq!(event.timestamp(), now);
    }

    #[test]
    fn test_event_debug() {
        let event = SiteEvent::PostsLoadFailed {
            reason: "HTTP status 503".to_owned(),
            at: Utc::now(),
        };

        let debug_str = format!("{event:?}");
        assert!(debug_str.contains("PostsLoadFailed"));
        assert!(debug_str.contains("503"));
    }
}
