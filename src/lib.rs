//! Core of the Nolyx Society site.
//!
//! - [`session`]: CAPTCHA-backed verification sessions kept in browser-style storage
//! - [`storage`]: durable and volatile key/value areas
//! - [`verification`]: the verification page submit flow and CAPTCHA helpers
//! - [`blog`]: post fetching, filtering, pagination and slugs
//! - [`wallet`]: connected-wallet state over a browser wallet extension
//! - [`events`]: observer hooks fired by all of the above
//!
//! Host primitives (storage, navigation, tab visibility, the wallet extension,
//! the remote content endpoint) are traits. The host injects them; nothing here
//! reaches for a global session object.

pub mod blog;
pub mod config;
pub mod events;
pub mod session;
pub mod storage;
pub mod verification;
pub mod wallet;

pub use config::NolyxConfig;
pub use events::{dispatch, register_event_listeners, SiteEvent};
pub use session::{
    Navigator, PageVisibility, SessionInfo, SessionManager, SessionMonitor, SessionRecord,
    SessionState,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SessionStore};

#[cfg(any(test, feature = "mocks"))]
pub use session::RecordingNavigator;
#[cfg(any(test, feature = "mocks"))]
pub use wallet::MockWalletProvider;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum NolyxError {
    StorageError(String),
    SerializationError(String),
    CaptchaMissing,
    CaptchaInvalid,
    VerificationInProgress,
    FetchError(String),
    InvalidPayload(String),
    WalletUnavailable,
    WalletRejected,
    WalletRequestPending,
    WalletError(String),
}

impl std::error::Error for NolyxError {}

impl fmt::Display for NolyxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NolyxError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            NolyxError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            NolyxError::CaptchaMissing => write!(f, "Please complete the CAPTCHA verification"),
            NolyxError::CaptchaInvalid => write!(f, "CAPTCHA response is malformed"),
            NolyxError::VerificationInProgress => {
                write!(f, "Verification is already being submitted")
            }
            NolyxError::FetchError(msg) => write!(f, "Failed to load content: {}", msg),
            NolyxError::InvalidPayload(msg) => write!(f, "Unexpected content payload: {}", msg),
            NolyxError::WalletUnavailable => write!(f, "Wallet extension not detected"),
            NolyxError::WalletRejected => write!(f, "Wallet connection request was rejected"),
            NolyxError::WalletRequestPending => {
                write!(f, "Wallet connection request is already pending")
            }
            NolyxError::WalletError(msg) => write!(f, "Wallet error: {}", msg),
        }
    }
}
