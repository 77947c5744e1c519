use thiserror::Error;

/// Top-level error type for the `aploc-api` crate.
///
/// Covers every failure mode of the OmniVista REST surface:
/// authentication, transport, HTTP status and body decoding.
/// `aploc-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected, or the bearer token was refused on a later call.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from the controller.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Tls(_))
    }

    /// HTTP status code, if the controller answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_comes_from_api_errors_only() {
        let api = Error::Api {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(api.status(), Some(503));
        assert!(!api.is_transport());

        let auth = Error::Authentication {
            message: "Invalid credentials".into(),
        };
        assert_eq!(auth.status(), None);

        let tls = Error::Tls("bad chain".into());
        assert_eq!(tls.status(), None);
        assert!(tls.is_transport());
    }
}
