// ── Runtime configuration ──
//
// These types describe *how* to reach the controller and *what* to feed
// the batch. They carry credential data and connection tuning but never
// touch disk: the CLI builds them and hands them in explicitly.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;
use crate::hostname::Hostname;

/// Login credential. Only ever used to obtain a session.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: SecretString,
}

/// TLS verification policy.
///
/// Management appliances usually ship self-signed certificates, so the
/// default skips validation. Production targets should use `Validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Verify the certificate chain; fail closed on mismatch.
    Validate,
    /// Accept any certificate.
    #[default]
    Insecure,
}

/// Configuration for connecting to a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub hostname: Hostname,
    pub credential: Credential,
    pub tls: TlsPolicy,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControllerConfig {
    /// `https://{hostname}`.
    pub fn base_url(&self) -> Result<Url, CoreError> {
        Url::parse(&format!("https://{}", self.hostname)).map_err(|e| {
            CoreError::ConnectionFailed {
                url: self.hostname.to_string(),
                reason: format!("Invalid URL: {e}"),
            }
        })
    }
}

/// What to read and where to write.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Delimited input file: identifier, new location, ...
    pub input: PathBuf,
    /// Field delimiter for both input and output.
    pub delimiter: u8,
    /// Directory that receives the timestamped results file.
    pub output_dir: PathBuf,
}
