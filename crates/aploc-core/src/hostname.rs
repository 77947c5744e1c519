// ── Controller hostname ──
//
// Operators paste controller addresses in every shape: bare IPs, FQDNs,
// full `https://` URLs with a trailing slash. `Hostname::parse` accepts
//
//     [ "http://" | "https://" ] host [ "/" ]
//
// where `host` is one or more of `[A-Za-z0-9_.-]` (Unicode alphanumerics
// included). Anything else, ports and paths among it, is rejected before
// a single request goes out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Why a hostname could not be sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostnameError {
    #[error("no host found in {input:?}; it should read like 1.2.3.4 or omnivista.home")]
    Empty { input: String },

    #[error(
        "invalid character {found:?} in {input:?}; it should read like 1.2.3.4 or omnivista.home"
    )]
    InvalidCharacter { input: String, found: char },
}

/// A sanitized controller host: an IP address or DNS name with no scheme,
/// port or path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hostname(String);

impl Hostname {
    pub fn parse(input: &str) -> Result<Self, HostnameError> {
        let rest = SCHEMES
            .iter()
            .find_map(|scheme| input.strip_prefix(scheme))
            .unwrap_or(input);
        let host = rest.strip_suffix('/').unwrap_or(rest);

        if host.is_empty() {
            return Err(HostnameError::Empty {
                input: input.to_owned(),
            });
        }

        if let Some(found) = host.chars().find(|c| !is_host_char(*c)) {
            return Err(HostnameError::InvalidCharacter {
                input: input.to_owned(),
                found,
            });
        }

        Ok(Self(host.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_host_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Hostname {
    type Err = HostnameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Hostname {
    type Error = HostnameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Hostname> for String {
    fn from(host: Hostname) -> Self {
        host.0
    }
}
