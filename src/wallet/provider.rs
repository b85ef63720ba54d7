use std::fmt;

use async_trait::async_trait;

use crate::NolyxError;

/// Error returned by the wallet extension, with its numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// The user dismissed the connection prompt.
    pub const USER_REJECTED: i64 = 4001;
    /// A connection prompt is already open.
    pub const REQUEST_PENDING: i64 = -32002;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ProviderError {}

impl From<ProviderError> for NolyxError {
    fn from(e: ProviderError) -> Self {
        match e.code {
            ProviderError::USER_REJECTED => NolyxError::WalletRejected,
            ProviderError::REQUEST_PENDING => NolyxError::WalletRequestPending,
            _ => NolyxError::WalletError(e.to_string()),
        }
    }
}

/// The injected wallet extension (EIP-1193 style requests).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// `eth_requestAccounts`: prompts the user to connect.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// `eth_accounts`: already-authorized accounts, no prompt.
    async fn accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// `eth_chainId`, hex encoded.
    async fn chain_id(&self) -> Result<String, ProviderError>;

    /// `eth_getBalance` at `latest`, hex encoded wei.
    async fn balance(&self, account: &str) -> Result<String, ProviderError>;
}

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockWalletProvider;

#[cfg(any(test, feature = "mocks"))]
mod mock {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ProviderError, WalletProvider};

    /// Scriptable in-memory wallet extension.
    pub struct MockWalletProvider {
        pub accounts: Mutex<Vec<String>>,
        pub authorized: Mutex<bool>,
        pub connect_error: Mutex<Option<ProviderError>>,
        pub chain_id: Mutex<String>,
        pub balance_wei: Mutex<String>,
    }

    impl MockWalletProvider {
        /// A wallet holding `accounts`, not yet authorized for this site.
        pub fn new(accounts: Vec<String>) -> Self {
            Self {
                accounts: Mutex::new(accounts),
                authorized: Mutex::new(false),
                connect_error: Mutex::new(None),
                chain_id: Mutex::new("0x1".to_owned()),
                balance_wei: Mutex::new("0x0".to_owned()),
            }
        }

        /// A wallet that already authorized this site.
        pub fn authorized(accounts: Vec<String>) -> Self {
            let provider = Self::new(accounts);
            *provider.authorized.lock().unwrap() = true;
            provider
        }

        /// Makes the next `request_accounts` fail with `code`.
        pub fn fail_next_connect(&self, code: i64) {
            *self.connect_error.lock().unwrap() = Some(ProviderError::new(code, "mock failure"));
        }
    }

    #[async_trait]
    impl WalletProvider for MockWalletProvider {
        async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
            if let Some(e) = self.connect_error.lock().unwrap().take() {
                return Err(e);
            }
            *self.authorized.lock().unwrap() = true;
            Ok(self.accounts.lock().unwrap().clone())
        }

        async fn accounts(&self) -> Result<Vec<String>, ProviderError> {
            if *self.authorized.lock().unwrap() {
                Ok(self.accounts.lock().unwrap().clone())
            } else {
                Ok(Vec::new())
            }
        }

        async fn chain_id(&self) -> Result<String, ProviderError> {
            Ok(self.chain_id.lock().unwrap().clone())
        }

        async fn balance(&self, _account: &str) -> Result<String, ProviderError> {
            Ok(self.balance_wei.lock().unwrap().clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            NolyxError::from(ProviderError::new(4001, "User rejected")),
            NolyxError::WalletRejected
        );
        assert_eq!(
            NolyxError::from(ProviderError::new(-32002, "Already processing")),
            NolyxError::WalletRequestPending
        );
        assert_eq!(
            NolyxError::from(ProviderError::new(-32603, "Internal")),
            NolyxError::WalletError("Internal (code -32603)".to_owned())
        );
    }
}
