//! Connected-wallet state.
//!
//! Wraps a browser wallet extension ([`WalletProvider`]) and tracks which
//! account, if any, is connected. Independent of the verification session.

mod connection;
mod provider;

use serde::Serialize;

pub use connection::WalletConnection;
pub use provider::{ProviderError, WalletProvider};
#[cfg(any(test, feature = "mocks"))]
pub use provider::MockWalletProvider;

/// Severity of a user-facing wallet notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Error => "Error!",
            Self::Warning => "Warning!",
            Self::Info => "Info",
        }
    }
}

/// A message the host shows as a toast or dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    #[serde(rename = "isConnected")]
    pub is_connected: bool,
    pub account: Option<String>,
    #[serde(rename = "truncatedAccount")]
    pub truncated_account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    /// As reported, e.g. `0x1`.
    #[serde(rename = "chainId")]
    pub chain_id: String,
    #[serde(rename = "chainIdDecimal")]
    pub chain_id_decimal: u64,
}

/// `0x1234...abcd`. Strings too short to shorten are returned as is.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Parses a `0x`-prefixed hex quantity.
pub(crate) fn parse_hex_quantity(value: &str) -> Option<u128> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if digits.is_empty() {
        return None;
    }

    u128::from_str_radix(digits, 16).ok()
}

/// Formats a wei amount as ether with four decimals.
pub fn format_ether(wei: u128) -> String {
    const WEI_PER_ETHER: f64 = 1e18;
    // display only; f64 precision is plenty for four decimals
    #[allow(clippy::cast_precision_loss)]
    let ether = wei as f64 / WEI_PER_ETHER;
    format!("{ether:.4}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0x52908400098527886E0F7030069857D2E4169EE7"),
            "0x5290...9EE7"
        );
        assert_eq!(truncate_address("0x1234"), "0x1234");
        assert_eq!(truncate_address(""), "");
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x1"), Some(1));
        assert_eq!(parse_hex_quantity("0x89"), Some(137));
        assert_eq!(parse_hex_quantity("ff"), Some(255));
        assert_eq!(parse_hex_quantity("0x"), None);
        assert_eq!(parse_hex_quantity("0xzz"), None);
    }

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(0), "0.0000");
        assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5000");
        assert_eq!(format_ether(123_456_789_000_000), "0.0001");
    }

    #[test]
    fn test_notification_titles() {
        assert_eq!(Notification::new(NotificationKind::Success, "ok").title, "Success!");
        assert_eq!(Notification::new(NotificationKind::Info, "hm").title, "Info");
    }
}
