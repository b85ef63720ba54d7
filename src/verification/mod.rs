//! The verification page.
//!
//! The CAPTCHA widget hands over a response token; [`VerificationFlow`]
//! turns that into a session and tells the page where to go next. The token
//! is never checked against the CAPTCHA vendor: any non-empty response is
//! accepted as proof.

mod captcha;
mod flow;

pub use captcha::{validate_captcha_token, validate_environment, CaptchaToken, EnvironmentReport};
pub use flow::VerificationFlow;
