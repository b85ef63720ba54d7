use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::events::{dispatch, SiteEvent};
use crate::session::Navigator;
use crate::NolyxError;

use super::{
    format_ether, parse_hex_quantity, truncate_address, ConnectionStatus, NetworkInfo,
    Notification, NotificationKind, WalletProvider,
};

/// Tracks the connected account of an optional wallet extension.
///
/// `provider` is `None` when the extension is not installed; every
/// operation then degrades to "disconnected".
pub struct WalletConnection<P> {
    provider: Option<P>,
    account: RwLock<Option<String>>,
    navigator: Arc<dyn Navigator>,
}

impl<P: WalletProvider> WalletConnection<P> {
    pub fn new(provider: Option<P>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            provider,
            account: RwLock::new(None),
            navigator,
        }
    }

    /// Picks up an existing authorization without prompting.
    pub async fn init(&self) {
        let Some(provider) = &self.provider else {
            return;
        };

        match provider.accounts().await {
            Ok(accounts) if !accounts.is_empty() => self.handle_accounts_changed(&accounts),
            Ok(_) => {}
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"error checking existing wallet connection\", error=\"{e}\""
                );
            }
        }
    }

    /// Prompts the user to connect and returns the connected account.
    ///
    /// # Returns
    ///
    /// - `Ok(account)` - first account granted
    /// - `Err(NolyxError::WalletUnavailable)` - no extension
    /// - `Err(NolyxError::WalletRejected)` - user dismissed the prompt
    /// - `Err(NolyxError::WalletRequestPending)` - a prompt is already open
    /// - `Err(_)` - any other extension failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "wallet.connect", skip_all, err)
    )]
    pub async fn try_connect(&self) -> Result<String, NolyxError> {
        let provider = self.provider.as_ref().ok_or(NolyxError::WalletUnavailable)?;

        let result = provider.request_accounts().await;
        let accounts = match result {
            Ok(accounts) => accounts,
            Err(e) => {
                self.set_account(None);
                dispatch(SiteEvent::WalletConnectFailed {
                    code: Some(e.code),
                    reason: e.message.clone(),
                    at: Utc::now(),
                });
                log::warn!(
                    target: "nolyx",
                    "msg=\"wallet connection failed\", code={}, error=\"{}\"",
                    e.code,
                    e.message
                );
                return Err(e.into());
            }
        };

        let Some(account) = accounts.first().cloned() else {
            self.set_account(None);
            return Err(NolyxError::WalletError("no accounts returned".to_owned()));
        };

        self.set_account(Some(account.clone()));

        dispatch(SiteEvent::WalletConnected {
            account: account.clone(),
            at: Utc::now(),
        });

        log::info!(
            target: "nolyx",
            "msg=\"wallet connected\", account={}",
            truncate_address(&account)
        );

        Ok(account)
    }

    /// Connect button handler: connects and returns the message to show.
    pub async fn connect(&self) -> Notification {
        match self.try_connect().await {
            Ok(_) => Notification::new(
                NotificationKind::Success,
                "Successfully connected to MetaMask! Your wallet is now linked to Nolyx Society.",
            ),
            Err(NolyxError::WalletUnavailable) => Notification::new(
                NotificationKind::Warning,
                "MetaMask wallet not detected. Please install MetaMask extension to connect your wallet and access Web3 features.",
            ),
            Err(NolyxError::WalletRejected) => Notification::new(
                NotificationKind::Info,
                "Connection request was rejected. Please try again and approve the connection to continue.",
            ),
            Err(NolyxError::WalletRequestPending) => Notification::new(
                NotificationKind::Info,
                "Connection request is already pending. Please check your MetaMask extension.",
            ),
            Err(_) => Notification::new(
                NotificationKind::Error,
                "Failed to connect to MetaMask. Please make sure your wallet is unlocked and try again.",
            ),
        }
    }

    /// Forgets the connected account locally. The extension keeps its authorization.
    pub fn disconnect(&self) -> Notification {
        self.set_account(None);

        dispatch(SiteEvent::WalletDisconnected { at: Utc::now() });
        log::info!(target: "nolyx", "msg=\"wallet disconnected\"");

        Notification::new(
            NotificationKind::Info,
            "Successfully disconnected from MetaMask. Your wallet is no longer connected to this site.",
        )
    }

    /// `accountsChanged` handler. An empty list means the user disconnected.
    pub fn handle_accounts_changed(&self, accounts: &[String]) {
        let account = accounts.first().cloned();
        self.set_account(account.clone());

        dispatch(SiteEvent::WalletAccountChanged {
            account,
            at: Utc::now(),
        });
    }

    /// `chainChanged` handler: the page reloads to pick up the new network.
    pub fn handle_chain_changed(&self) {
        self.navigator.reload();
    }

    pub fn is_connected(&self) -> bool {
        self.current_account().is_some()
    }

    pub fn current_account(&self) -> Option<String> {
        self.account.read().ok().and_then(|guard| guard.clone())
    }

    pub fn status(&self) -> ConnectionStatus {
        let account = self.current_account();
        ConnectionStatus {
            is_connected: account.is_some(),
            truncated_account: account.as_deref().map(truncate_address),
            account,
        }
    }

    /// Chain id of the current network, or `None` without an extension or on error.
    pub async fn network_info(&self) -> Option<NetworkInfo> {
        let provider = self.provider.as_ref()?;

        let chain_id = match provider.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"error getting network info\", error=\"{e}\""
                );
                return None;
            }
        };

        let decimal = parse_hex_quantity(&chain_id).and_then(|id| u64::try_from(id).ok())?;

        Some(NetworkInfo {
            chain_id,
            chain_id_decimal: decimal,
        })
    }

    /// Balance of the connected account in ether, four decimals.
    pub async fn balance(&self) -> Option<String> {
        let provider = self.provider.as_ref()?;
        let account = self.current_account()?;

        match provider.balance(&account).await {
            Ok(hex) => parse_hex_quantity(&hex).map(format_ether),
            Err(e) => {
                log::error!(
                    target: "nolyx",
                    "msg=\"error getting balance\", error=\"{e}\""
                );
                None
            }
        }
    }

    fn set_account(&self, account: Option<String>) {
        match self.account.write() {
            Ok(mut guard) => *guard = account,
            Err(poisoned) => *poisoned.into_inner() = account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RecordingNavigator;
    use crate::wallet::{MockWalletProvider, ProviderError};

    const ACCOUNT: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    fn connection(
        provider: Option<MockWalletProvider>,
    ) -> (WalletConnection<MockWalletProvider>, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::new());
        (WalletConnection::new(provider, navigator.clone()), navigator)
    }

    #[tokio::test]
    async fn test_init_picks_up_existing_authorization() {
        let (wallet, _) = connection(Some(MockWalletProvider::authorized(vec![
            ACCOUNT.to_owned(),
        ])));

        wallet.init().await;
        assert!(wallet.is_connected());
        assert_eq!(wallet.current_account().as_deref(), Some(ACCOUNT));
    }

    #[tokio::test]
    async fn test_init_without_authorization() {
        let (wallet, _) = connection(Some(MockWalletProvider::new(vec![ACCOUNT.to_owned()])));

        wallet.init().await;
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_connect_success() {
        let (wallet, _) = connection(Some(MockWalletProvider::new(vec![ACCOUNT.to_owned()])));

        let notification = wallet.connect().await;
        assert_eq!(notification.kind, NotificationKind::Success);

        let status = wallet.status();
        assert!(status.is_connected);
        assert_eq!(status.account.as_deref(), Some(ACCOUNT));
        assert_eq!(status.truncated_account.as_deref(), Some("0x5290...9EE7"));
    }

    #[tokio::test]
    async fn test_connect_without_extension() {
        let (wallet, _) = connection(None);

        assert_eq!(
            wallet.try_connect().await.unwrap_err(),
            NolyxError::WalletUnavailable
        );
        assert_eq!(wallet.connect().await.kind, NotificationKind::Warning);
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_connect_rejected() {
        let provider = MockWalletProvider::new(vec![ACCOUNT.to_owned()]);
        provider.fail_next_connect(ProviderError::USER_REJECTED);
        let (wallet, _) = connection(Some(provider));

        let notification = wallet.connect().await;
        assert_eq!(notification.kind, NotificationKind::Info);
        assert!(notification.message.contains("rejected"));
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_connect_pending() {
        let provider = MockWalletProvider::new(vec![ACCOUNT.to_owned()]);
        provider.fail_next_connect(ProviderError::REQUEST_PENDING);
        let (wallet, _) = connection(Some(provider));

        assert_eq!(
            wallet.try_connect().await.unwrap_err(),
            NolyxError::WalletRequestPending
        );
    }

    #[tokio::test]
    async fn test_connect_unknown_error_reverts_state() {
        let provider = MockWalletProvider::authorized(vec![ACCOUNT.to_owned()]);
        let (wallet, _) = connection(Some(provider));
        wallet.init().await;
        assert!(wallet.is_connected());

        wallet
            .provider
            .as_ref()
            .unwrap()
            .fail_next_connect(-32603);

        let notification = wallet.connect().await;
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let (wallet, _) = connection(Some(MockWalletProvider::new(vec![ACCOUNT.to_owned()])));
        wallet.try_connect().await.unwrap();

        let notification = wallet.disconnect();
        assert_eq!(notification.kind, NotificationKind::Info);
        assert!(!wallet.is_connected());
        assert_eq!(wallet.status().truncated_account, None);
    }

    #[test]
    fn test_accounts_changed() {
        let (wallet, _) = connection(Some(MockWalletProvider::new(vec![])));

        wallet.handle_accounts_changed(&[ACCOUNT.to_owned()]);
        assert!(wallet.is_connected());

        wallet.handle_accounts_changed(&[]);
        assert!(!wallet.is_connected());
    }

    #[test]
    fn test_chain_changed_reloads() {
        let (wallet, navigator) = connection(Some(MockWalletProvider::new(vec![])));

        wallet.handle_chain_changed();
        assert_eq!(navigator.reload_count(), 1);
    }

    #[tokio::test]
    async fn test_network_info() {
        let provider = MockWalletProvider::new(vec![]);
        *provider.chain_id.lock().unwrap() = "0x89".to_owned();
        let (wallet, _) = connection(Some(provider));

        let info = wallet.network_info().await.unwrap();
        assert_eq!(info.chain_id, "0x89");
        assert_eq!(info.chain_id_decimal, 137);
    }

    #[tokio::test]
    async fn test_network_info_without_extension() {
        let (wallet, _) = connection(None);
        assert!(wallet.network_info().await.is_none());
    }

    #[tokio::test]
    async fn test_balance() {
        let provider = MockWalletProvider::new(vec![ACCOUNT.to_owned()]);
        // 2.5 ether
        *provider.balance_wei.lock().unwrap() = "0x22b1c8c1227a0000".to_owned();
        let (wallet, _) = connection(Some(provider));

        assert!(wallet.balance().await.is_none());

        wallet.try_connect().await.unwrap();
        assert_eq!(wallet.balance().await.as_deref(), Some("2.5000"));
    }
}
