//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use aploc_config::ConfigError;
use aploc_core::{CoreError, HostnameError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to OmniVista at {url}")]
    #[diagnostic(
        code(aploc::connection_failed),
        help(
            "{reason}\n\
             Check that the controller is reachable over HTTPS.\n\
             If it uses a self-signed certificate, drop --check-certificates."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(aploc::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(aploc::auth_failed),
        help(
            "Verify the username and password.\n\
             Stored passwords can be replaced with: aploc config set-password"
        )
    )]
    AuthFailed { message: String },

    // ── Controller ───────────────────────────────────────────────────
    #[error("OmniVista API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(aploc::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Input / output ───────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(aploc::invalid_hostname),
        help("Pass an IP or DNS name, e.g. -i 10.0.0.5 or -f omnivista.example.org")
    )]
    InvalidHostname(#[from] HostnameError),

    #[error("Invalid input at line {line}: {reason}")]
    #[diagnostic(
        code(aploc::invalid_input),
        help("Every row needs at least two columns: AP MAC, new location. Check --csv-delimiter.")
    )]
    InvalidInput { line: u64, reason: String },

    #[error("{message}")]
    #[diagnostic(code(aploc::file))]
    File { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(aploc::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(aploc::config),
        help("Inspect the active configuration with: aploc config show")
    )]
    Config(#[from] ConfigError),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(aploc::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::InvalidHostname(_) | Self::Validation { .. } => exit_code::USAGE,
            Self::Config(e) if e.is_usage() => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Timeout { url } => CliError::Timeout { url },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::InvalidHostname(e) => CliError::InvalidHostname(e),
            CoreError::InvalidInput { line, reason } => CliError::InvalidInput { line, reason },
            e @ (CoreError::Csv { .. } | CoreError::Io { .. }) => CliError::File {
                message: e.to_string(),
            },
            CoreError::Api { message, status } => CliError::Api { message, status },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
