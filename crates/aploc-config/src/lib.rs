//! Configuration for the aploc CLI.
//!
//! TOML defaults and named controller profiles, layered with `APLOC_`
//! environment variables, plus password resolution across flag,
//! environment, system keyring and plaintext config. Translation into
//! runtime types happens in the binary, where command-line flags are known.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable consulted for the controller password.
pub const PASSWORD_ENV: &str = "APLOC_PASSWORD";

/// Keyring service name; entries are keyed `<profile>/password`.
const KEYRING_SERVICE: &str = "aploc";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in {}", path.display())]
    UnknownProfile { name: String, path: PathBuf },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// `true` when the request itself was wrong rather than the environment.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownProfile { .. })
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_username")]
    pub username: String,

    /// Single-character field delimiter for input and results.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Verify the controller's TLS certificate.
    #[serde(default)]
    pub check_certificates: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Directory for results files (current directory when unset).
    pub output_dir: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            username: default_username(),
            delimiter: default_delimiter(),
            check_certificates: false,
            timeout: default_timeout(),
            output_dir: None,
        }
    }
}

fn default_username() -> String {
    "admin".into()
}
fn default_delimiter() -> String {
    ",".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile. Unset fields fall back to [`Defaults`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Controller IP or DNS name, optionally with an `http(s)://` prefix.
    pub host: Option<String>,

    pub username: Option<String>,

    /// Password (plaintext; prefer the keyring).
    pub password: Option<String>,

    /// Override `defaults.check_certificates`.
    pub check_certificates: Option<bool>,
}

impl Config {
    /// Name of the profile to use: the explicit one, else `default_profile`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
    }

    /// Look up `name`. An explicitly requested profile must exist; a
    /// configured default that is missing is treated as no profile.
    pub fn profile(
        &self,
        name: Option<&str>,
        explicit: bool,
    ) -> Result<Option<&Profile>, ConfigError> {
        let Some(name) = name else {
            return Ok(None);
        };
        match self.profiles.get(name) {
            Some(profile) => Ok(Some(profile)),
            None if explicit => Err(ConfigError::UnknownProfile {
                name: name.into(),
                path: config_path(),
            }),
            None => Ok(None),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "aploc", "aploc").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("aploc");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` plus environment. A missing file is not an
/// error. Nested keys use a double underscore, e.g.
/// `APLOC_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("APLOC_").split("__"))
        .extract()?;
    Ok(config)
}

/// Render `config` as TOML with every password replaced by `****`.
pub fn redacted(config: &Config) -> Result<String, ConfigError> {
    let mut masked = config.clone();
    for profile in masked.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    Ok(toml::to_string_pretty(&masked)?)
}

// ── Password resolution ─────────────────────────────────────────────

/// Resolve the controller password without prompting.
///
/// Order: `flag`, then `APLOC_PASSWORD`, then the keyring entry
/// `aploc` / `<profile>/password`, then the profile's plaintext
/// `password`. `None` means the caller has to ask.
pub fn resolve_password(
    flag: Option<&str>,
    profile: Option<&Profile>,
    profile_name: Option<&str>,
) -> Option<SecretString> {
    resolve_password_with(
        flag,
        std::env::var(PASSWORD_ENV).ok(),
        profile,
        profile_name,
        keyring_password,
    )
}

fn resolve_password_with(
    flag: Option<&str>,
    env: Option<String>,
    profile: Option<&Profile>,
    profile_name: Option<&str>,
    keyring: impl FnOnce(&str) -> Option<String>,
) -> Option<SecretString> {
    flag.map(str::to_owned)
        .or(env)
        .or_else(|| profile_name.and_then(keyring))
        .or_else(|| profile.and_then(|p| p.password.clone()))
        .map(SecretString::from)
}

fn keyring_password(profile_name: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")).ok()?;
    entry.get_password().ok()
}

/// Store `password` in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))?;
    entry
        .set_password(password)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn no_keyring(_: &str) -> Option<String> {
        None
    }

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let f = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(f.path(), contents).unwrap();
        f
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config.defaults.username, "admin");
        assert_eq!(config.defaults.delimiter, ",");
        assert_eq!(config.defaults.timeout, 30);
        assert!(!config.defaults.check_certificates);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn reads_defaults_and_profiles() {
        let f = write(
            r#"
default_profile = "lab"

[defaults]
delimiter = ";"
timeout = 10

[profiles.lab]
host = "https://ov.lab.example/"
username = "ops"
check_certificates = true
"#,
        );
        let config = load_config_from(f.path()).unwrap();

        assert_eq!(config.defaults.delimiter, ";");
        assert_eq!(config.defaults.timeout, 10);
        assert_eq!(config.defaults.username, "admin");
        let lab = &config.profiles["lab"];
        assert_eq!(lab.host.as_deref(), Some("https://ov.lab.example/"));
        assert_eq!(lab.username.as_deref(), Some("ops"));
        assert_eq!(lab.check_certificates, Some(true));
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let config = Config::default();
        assert!(matches!(
            config.profile(Some("nope"), true),
            Err(ConfigError::UnknownProfile { .. })
        ));
        assert!(config.profile(Some("nope"), false).unwrap().is_none());
        assert!(config.profile(None, false).unwrap().is_none());
    }

    #[test]
    fn usage_errors_are_the_callers_fault() {
        let unknown = ConfigError::UnknownProfile {
            name: "nope".into(),
            path: PathBuf::from("config.toml"),
        };
        assert!(unknown.is_usage());
        assert!(!ConfigError::Keyring("locked".into()).is_usage());
    }

    #[test]
    fn active_profile_prefers_explicit_name() {
        let config = Config {
            default_profile: Some("lab".into()),
            ..Config::default()
        };
        let explicit = config.active_profile_name(Some("prod"));
        assert_eq!(explicit.as_deref(), Some("prod"));
        assert_eq!(config.active_profile_name(None).as_deref(), Some("lab"));
        assert_eq!(Config::default().active_profile_name(None), None);
    }

    #[test]
    fn redacted_masks_passwords() {
        let mut config = Config::default();
        config.profiles.insert(
            "lab".into(),
            Profile {
                host: Some("10.0.0.5".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );
        let text = redacted(&config).unwrap();
        assert!(text.contains("****"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("10.0.0.5"));
    }

    // ── Password chain ──────────────────────────────────────────────

    fn profile_with_password() -> Profile {
        Profile {
            password: Some("from-file".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn flag_wins() {
        let pw = resolve_password_with(
            Some("from-flag"),
            Some("from-env".into()),
            Some(&profile_with_password()),
            Some("lab"),
            |_| Some("from-keyring".into()),
        );
        assert_eq!(pw.unwrap().expose_secret(), "from-flag");
    }

    #[test]
    fn env_beats_keyring_and_file() {
        let pw = resolve_password_with(
            None,
            Some("from-env".into()),
            Some(&profile_with_password()),
            Some("lab"),
            |_| Some("from-keyring".into()),
        );
        assert_eq!(pw.unwrap().expose_secret(), "from-env");
    }

    #[test]
    fn keyring_is_keyed_by_profile() {
        let pw = resolve_password_with(
            None,
            None,
            Some(&profile_with_password()),
            Some("lab"),
            |name| (name == "lab").then(|| "from-keyring".into()),
        );
        assert_eq!(pw.unwrap().expose_secret(), "from-keyring");
    }

    #[test]
    fn plaintext_is_last_resort() {
        let pw = resolve_password_with(
            None,
            None,
            Some(&profile_with_password()),
            Some("lab"),
            no_keyring,
        );
        assert_eq!(pw.unwrap().expose_secret(), "from-file");
    }

    #[test]
    fn nothing_configured_means_prompt() {
        let pw = resolve_password_with(None, None, None, None, no_keyring);
        assert!(pw.is_none());
    }
}
