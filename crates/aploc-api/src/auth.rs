use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// An authenticated OmniVista session.
///
/// Wraps the bearer token returned by `POST /rest-api/login`. The value
/// is immutable once issued and is passed explicitly to every call that
/// needs authorization; the client itself holds no session state.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: SecretString,
}

impl Session {
    pub fn new(access_token: SecretString) -> Self {
        Self { access_token }
    }

    /// The `Authorization` header value for this session (`Bearer <token>`).
    ///
    /// Marked sensitive so it never shows up in reqwest's debug output.
    pub(crate) fn authorization(&self) -> Result<HeaderValue, Error> {
        let raw = format!("Bearer {}", self.access_token.expose_secret());
        let mut value = HeaderValue::from_str(&raw).map_err(|e| Error::Authentication {
            message: format!("access token is not a valid header value: {e}"),
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
