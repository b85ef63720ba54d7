use std::sync::Arc;

use crate::session::SessionManager;
use crate::storage::KeyValueStore;
use crate::NolyxError;

use super::CaptchaToken;

/// Submit logic of the verification page.
///
/// The submit control starts disabled and is enabled by the widget's success
/// callback. A successful submit creates the session and returns the page
/// to navigate to.
pub struct VerificationFlow<D, V> {
    sessions: Arc<SessionManager<D, V>>,
    response: Option<CaptchaToken>,
    submitting: bool,
}

impl<D: KeyValueStore, V: KeyValueStore> VerificationFlow<D, V> {
    pub fn new(sessions: Arc<SessionManager<D, V>>) -> Self {
        Self {
            sessions,
            response: None,
            submitting: false,
        }
    }

    /// Widget success callback.
    pub fn on_captcha_success(&mut self, token: CaptchaToken) {
        if token.is_empty() {
            self.response = None;
            return;
        }
        self.response = Some(token);
    }

    /// Widget expiry callback; the visitor has to solve the challenge again.
    pub fn on_captcha_expired(&mut self) {
        self.response = None;
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.response.is_some() && !self.submitting
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Creates the session for `user_agent`.
    ///
    /// # Returns
    ///
    /// - `Ok(path)` - where to send the visitor next
    /// - `Err(NolyxError::CaptchaMissing)` - no CAPTCHA response yet
    /// - `Err(NolyxError::VerificationInProgress)` - already submitted
    /// - `Err(_)` - the session could not be stored
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "verification.submit", skip_all, err)
    )]
    pub fn submit(&mut self, user_agent: &str) -> Result<String, NolyxError> {
        if self.submitting {
            return Err(NolyxError::VerificationInProgress);
        }

        if self.response.is_none() {
            log::info!(
                target: "nolyx",
                "msg=\"verification submitted without captcha response\""
            );
            return Err(NolyxError::CaptchaMissing);
        }

        self.submitting = true;

        if let Err(e) = self.sessions.create_session(user_agent) {
            self.submitting = false;
            return Err(e);
        }

        log::info!(target: "nolyx", "msg=\"verification passed\"");

        Ok(self.sessions.config().protected_path.clone())
    }
}
