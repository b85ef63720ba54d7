//! Configuration types for the Nolyx site core.
//!
//! Every timing, storage key and endpoint the site uses lives here so hosts
//! can override them without touching the session or blog logic.
//!
//! # Example
//!
//! ```rust
//! use nolyx::config::{NolyxConfig, SessionConfig};
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = NolyxConfig::default();
//!
//! // Or customize
//! let config = NolyxConfig {
//!     session: SessionConfig {
//!         session_lifetime: Duration::hours(12),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! ```

use chrono::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct NolyxConfig {
    /// Verification session storage and lifetime.
    pub session: SessionConfig,

    /// Background session checks.
    pub monitor: MonitorConfig,

    /// Remote blog content.
    pub blog: BlogConfig,

    /// CAPTCHA widget settings.
    pub captcha: CaptchaConfig,
}

impl NolyxConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for local development.
    ///
    /// Checks run every minute so expiry is visible quickly.
    pub fn development() -> Self {
        Self {
            monitor: MonitorConfig {
                check_interval: std::time::Duration::from_secs(60),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Shorter sessions that are not silently kept alive.
    pub fn strict() -> Self {
        Self {
            session: SessionConfig {
                session_lifetime: Duration::hours(1),
                extension: Duration::hours(1),
                expiring_soon_threshold: Duration::minutes(10),
                ..Default::default()
            },
            monitor: MonitorConfig {
                check_interval: std::time::Duration::from_secs(60),
                auto_refresh: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Verification session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key of the JSON record in the durable store.
    ///
    /// Default: `nolyxVerificationSession`
    pub durable_key: String,

    /// Key of the marker in the volatile (per-tab) store.
    ///
    /// Default: `nolyxVerified`
    pub volatile_key: String,

    /// Lifetime of a freshly created session.
    ///
    /// Default: 24 hours
    pub session_lifetime: Duration,

    /// Default window applied by `extend_session(None)`.
    ///
    /// Default: 24 hours
    pub extension: Duration,

    /// Remaining time under which a session counts as expiring soon.
    ///
    /// Default: 1 hour
    pub expiring_soon_threshold: Duration,

    /// Where unverified visitors are sent.
    ///
    /// Default: `/verif`
    pub verification_path: String,

    /// Where a visitor lands after passing verification.
    ///
    /// Default: `/join`
    pub protected_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            durable_key: "nolyxVerificationSession".to_owned(),
            volatile_key: "nolyxVerified".to_owned(),
            session_lifetime: Duration::hours(24),
            extension: Duration::hours(24),
            expiring_soon_threshold: Duration::hours(1),
            verification_path: "/verif".to_owned(),
            protected_path: "/join".to_owned(),
        }
    }
}

/// Background session monitoring.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Period of the validity check.
    ///
    /// Default: 5 minutes
    pub check_interval: std::time::Duration,

    /// Period of the keep-alive extension.
    ///
    /// Default: 12 hours
    pub refresh_interval: std::time::Duration,

    /// Hours granted by each keep-alive extension.
    ///
    /// Default: 24
    pub refresh_hours: i64,

    /// Run the keep-alive extension at all.
    pub auto_refresh: bool,

    /// Navigate to the verification page when a periodic check fails.
    pub redirect_on_expiry: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: std::time::Duration::from_secs(5 * 60),
            refresh_interval: std::time::Duration::from_secs(12 * 60 * 60),
            refresh_hours: 24,
            auto_refresh: true,
            redirect_on_expiry: true,
        }
    }
}

/// Remote blog content.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// JSON blob holding the post list.
    pub posts_url: String,

    /// Posts revealed per "load more" step.
    ///
    /// Default: 6
    pub posts_per_page: usize,

    /// Posts shown under "related articles".
    ///
    /// Default: 3
    pub related_posts: usize,

    /// Whole-request timeout for the blob fetch.
    ///
    /// Default: 10 seconds
    pub request_timeout: std::time::Duration,

    /// Site name appended to page titles.
    pub site_name: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_url: "https://api.jsonbin.io/v3/b/685bffd98561e97a502b9481".to_owned(),
            posts_per_page: 6,
            related_posts: 3,
            request_timeout: std::time::Duration::from_secs(10),
            site_name: "Nolyx Society".to_owned(),
        }
    }
}

/// Site key published by the CAPTCHA vendor's documentation.
pub const EXAMPLE_SITE_KEY: &str = "6LdGRm8rAAAAAJMzE_ezbOw3Cxan67FHmkY9atJG";

/// CAPTCHA widget settings.
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    pub site_key: String,

    /// Used when the page is served from localhost.
    pub dev_site_key: String,

    /// `light` or `dark`.
    pub theme: String,

    /// `normal` or `compact`.
    pub size: String,

    /// Shortest response accepted by the strict token format check.
    ///
    /// Default: 100
    pub min_token_length: usize,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            site_key: "6LfhynArAAAAAJkto7sf9CExHObip1UPOUKkdgKp".to_owned(),
            dev_site_key: "6LfhynArAAAAAJkto7sf9CExHObip1UPOUKkdgKp".to_owned(),
            theme: "light".to_owned(),
            size: "normal".to_owned(),
            min_token_length: 100,
        }
    }
}

impl CaptchaConfig {
    /// Picks the development key when served from a local host.
    pub fn site_key_for(&self, hostname: &str) -> &str {
        if is_local_host(hostname) {
            &self.dev_site_key
        } else {
            &self.site_key
        }
    }
}

pub(crate) fn is_local_host(hostname: &str) -> bool {
    hostname == "127.0.0.1" || hostname.contains("localhost")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NolyxConfig::default();

        assert_eq!(config.session.durable_key, "nolyxVerificationSession");
        assert_eq!(config.session.volatile_key, "nolyxVerified");
        assert_eq!(config.session.session_lifetime, Duration::hours(24));
        assert_eq!(config.session.extension, Duration::hours(24));
        assert_eq!(config.session.expiring_soon_threshold, Duration::hours(1));
        assert_eq!(config.session.verification_path, "/verif");
        assert_eq!(
            config.monitor.check_interval,
            std::time::Duration::from_secs(300)
        );
        assert_eq!(
            config.monitor.refresh_interval,
            std::time::Duration::from_secs(43_200)
        );
        assert_eq!(config.blog.posts_per_page, 6);
        assert_eq!(config.captcha.min_token_length, 100);
    }

    #[test]
    fn test_strict_config() {
        let config = NolyxConfig::strict();

        assert_eq!(config.session.session_lifetime, Duration::hours(1));
        assert!(!config.monitor.auto_refresh);
    }

    #[test]
    fn test_development_config() {
        let config = NolyxConfig::development();

        assert_eq!(
            config.monitor.check_interval,
            std::time::Duration::from_secs(60)
        );
        assert_eq!(config.session.session_lifetime, Duration::hours(24));
    }

    #[test]
    fn test_site_key_for_localhost() {
        let config = CaptchaConfig {
            site_key: "prod".to_owned(),
            dev_site_key: "dev".to_owned(),
            ..Default::default()
        };

        assert_eq!(config.site_key_for("localhost"), "dev");
        assert_eq!(config.site_key_for("127.0.0.1"), "dev");
        assert_eq!(config.site_key_for("nolyx.society"), "prod");
    }
}
