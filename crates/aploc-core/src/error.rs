// ── Core error types ──
//
// User-facing errors from aploc-core. Consumers never see reqwest errors
// or JSON parse failures directly: the `From<aploc_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.
//
// Every variant here is batch-fatal. Row-local conditions (device not
// found, update rejected) are outcomes, not errors.

use thiserror::Error;

use crate::hostname::HostnameError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error(transparent)]
    InvalidHostname(#[from] HostnameError),

    #[error("Invalid input at line {line}: {reason}")]
    InvalidInput { line: u64, reason: String },

    #[error("Cannot read CSV from {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: impl AsRef<std::path::Path>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<aploc_api::Error> for CoreError {
    fn from(err: aploc_api::Error) -> Self {
        match err {
            aploc_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            aploc_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() || e.is_request() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            aploc_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("Invalid URL: {e}"),
            },
            aploc_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            aploc_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            aploc_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
