use std::fmt;

use serde::Serialize;

use crate::config::{is_local_host, CaptchaConfig, EXAMPLE_SITE_KEY};
use crate::NolyxError;

/// A CAPTCHA response token.
///
/// `Debug` and `Display` print `[REDACTED]`.
#[derive(Clone, PartialEq, Eq)]
pub struct CaptchaToken(String);

impl CaptchaToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for CaptchaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CaptchaToken([REDACTED])")
    }
}

impl fmt::Display for CaptchaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for CaptchaToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CaptchaToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Strict format check for a response token.
///
/// Real responses are long base64-like strings; anything shorter than
/// `min_length` is rejected.
pub fn validate_captcha_token(token: &CaptchaToken, min_length: usize) -> Result<(), NolyxError> {
    if token.is_empty() {
        return Err(NolyxError::CaptchaMissing);
    }

    if token.len() < min_length {
        return Err(NolyxError::CaptchaInvalid);
    }

    Ok(())
}

/// Result of [`validate_environment`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentReport {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Checks whether the widget is likely to work where the page is served.
///
/// `protocol` is the URL scheme including the colon, e.g. `https:`.
pub fn validate_environment(
    config: &CaptchaConfig,
    hostname: &str,
    protocol: &str,
) -> EnvironmentReport {
    let mut report = EnvironmentReport {
        is_valid: true,
        ..Default::default()
    };

    let site_key = config.site_key_for(hostname);
    if site_key.is_empty() {
        report.is_valid = false;
        report
            .errors
            .push("No CAPTCHA site key configured".to_owned());
    } else if site_key == EXAMPLE_SITE_KEY {
        report
            .warnings
            .push("Using default/example site key - should be replaced in production".to_owned());
    }

    if protocol != "https:" && hostname != "localhost" {
        report
            .warnings
            .push("CAPTCHA works best over HTTPS".to_owned());
    }

    if !is_local_host(hostname) && !hostname.contains("nolyx") {
        report
            .warnings
            .push("Domain may not be registered with the CAPTCHA service".to_owned());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_redacted() {
        let token = CaptchaToken::new("03AGdBq24-secret");

        assert_eq!(format!("{token:?}"), "CaptchaToken([REDACTED])");
        assert_eq!(token.to_string(), "[REDACTED]");
        assert_eq!(token.expose_secret(), "03AGdBq24-secret");
    }

    #[test]
    fn test_validate_token() {
        assert_eq!(
            validate_captcha_token(&CaptchaToken::new(""), 100).unwrap_err(),
            NolyxError::CaptchaMissing
        );
        assert_eq!(
            validate_captcha_token(&CaptchaToken::new("short"), 100).unwrap_err(),
            NolyxError::CaptchaInvalid
        );
        assert!(validate_captcha_token(&CaptchaToken::new("a".repeat(100)), 100).is_ok());
    }

    #[test]
    fn test_environment_production() {
        let report = validate_environment(&CaptchaConfig::default(), "nolyx.society", "https:");

        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_environment_missing_key() {
        let config = CaptchaConfig {
            site_key: String::new(),
            ..Default::default()
        };
        let report = validate_environment(&config, "nolyx.society", "https:");

        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_environment_example_key_and_foreign_host() {
        let config = CaptchaConfig {
            site_key: EXAMPLE_SITE_KEY.to_owned(),
            ..Default::default()
        };
        let report = validate_environment(&config, "example.org", "http:");

        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_environment_localhost_http() {
        let report = validate_environment(&CaptchaConfig::default(), "localhost", "http:");

        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }
}
