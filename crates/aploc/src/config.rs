//! CLI configuration: merges `relocate` flags over the active profile and
//! the config defaults into core runtime types.
//!
//! Precedence is always flag, then profile, then `[defaults]`.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use aploc_config::{Config, Profile};
use aploc_core::{ControllerConfig, Credential, Hostname, JobConfig, TlsPolicy};

use crate::cli::{GlobalOpts, RelocateArgs};
use crate::error::CliError;

pub use aploc_config::{config_path, load_config};

/// Everything `relocate` needs, resolved.
#[derive(Debug)]
pub struct Resolved {
    pub controller: ControllerConfig,
    pub job: JobConfig,
    /// The host as given, when sanitizing changed it.
    pub rewritten_from: Option<String>,
}

/// Resolve `relocate` flags against `config`.
///
/// `prompt` is only called when no password is found in the flag, the
/// environment, the keyring or the profile. It receives the prompt text.
pub fn resolve(
    args: &RelocateArgs,
    global: &GlobalOpts,
    config: &Config,
    prompt: impl FnOnce(&str) -> Result<SecretString, CliError>,
) -> Result<Resolved, CliError> {
    let profile_name = config.active_profile_name(global.profile.as_deref());
    let profile = config.profile(profile_name.as_deref(), global.profile.is_some())?;
    let defaults = &config.defaults;

    // 1. Host (flag > profile), sanitized before anything else
    let raw_host = args
        .ov_ip
        .as_deref()
        .or(args.ov_fqdn.as_deref())
        .or_else(|| profile.and_then(|p| p.host.as_deref()))
        .ok_or_else(|| CliError::Validation {
            field: "controller".into(),
            reason: "pass --ov-ip or --ov-fqdn, or set `host` in a profile".into(),
        })?;
    let hostname = Hostname::parse(raw_host)?;
    let rewritten_from = (hostname.as_str() != raw_host).then(|| raw_host.to_owned());

    // 2. TLS
    let tls = tls_policy(args, profile, defaults.check_certificates);

    // 3. Credential
    let username = args
        .ov_username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .unwrap_or_else(|| defaults.username.clone());

    let password = match aploc_config::resolve_password(
        args.ov_password.as_deref(),
        profile,
        profile_name.as_deref(),
    ) {
        Some(password) => password,
        None => prompt(&format!("Password for {username}@{hostname}: "))?,
    };

    // 4. Transport and job
    let timeout = global.timeout.unwrap_or(defaults.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }

    let delimiter = parse_delimiter(args.csv_delimiter.as_deref().unwrap_or(&defaults.delimiter))?;

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| defaults.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(Resolved {
        controller: ControllerConfig {
            hostname,
            credential: Credential { username, password },
            tls,
            timeout: Duration::from_secs(timeout),
        },
        job: JobConfig {
            input: args.csv_input_file.clone(),
            delimiter,
            output_dir,
        },
        rewritten_from,
    })
}

fn tls_policy(args: &RelocateArgs, profile: Option<&Profile>, default_check: bool) -> TlsPolicy {
    let check = if args.check_certificates {
        true
    } else if args.insecure {
        false
    } else {
        profile
            .and_then(|p| p.check_certificates)
            .unwrap_or(default_check)
    };

    if check {
        TlsPolicy::Validate
    } else {
        TlsPolicy::Insecure
    }
}

/// A delimiter is exactly one ASCII character other than a quote or a
/// line break.
pub fn parse_delimiter(raw: &str) -> Result<u8, CliError> {
    let invalid = |reason: &str| CliError::Validation {
        field: "csv-delimiter".into(),
        reason: format!("{reason}, got {raw:?}"),
    };

    match raw.as_bytes() {
        [b'"' | b'\n' | b'\r'] => Err(invalid("quotes and line breaks cannot delimit fields")),
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(invalid("expected a single ASCII character")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::{Cli, Command};

    fn parse(args: &[&str]) -> (RelocateArgs, GlobalOpts) {
        let argv = std::iter::once("aploc").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Relocate(r) => (r, cli.global),
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn no_prompt(_: &str) -> Result<SecretString, CliError> {
        panic!("prompt should not be called")
    }

    fn lab_config() -> Config {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "lab".to_owned(),
            Profile {
                host: Some("https://ov.lab.example/".into()),
                username: Some("ops".into()),
                password: Some("from-profile".into()),
                check_certificates: Some(true),
            },
        );
        Config {
            default_profile: None,
            defaults: aploc_config::Defaults::default(),
            profiles,
        }
    }

    #[test]
    fn flags_only() {
        let (args, global) = parse(&["relocate", "-i", "10.0.0.5", "-p", "pw", "-x", "in.csv"]);
        let r = resolve(&args, &global, &Config::default(), no_prompt).unwrap();

        assert_eq!(r.controller.hostname.as_str(), "10.0.0.5");
        assert_eq!(r.controller.credential.username, "admin");
        assert_eq!(r.controller.credential.password.expose_secret(), "pw");
        assert_eq!(r.controller.tls, TlsPolicy::Insecure);
        assert_eq!(r.controller.timeout, Duration::from_secs(30));
        assert_eq!(r.job.delimiter, b',');
        assert_eq!(r.job.input, PathBuf::from("in.csv"));
        assert_eq!(r.job.output_dir, PathBuf::from("."));
        assert!(r.rewritten_from.is_none());
    }

    #[test]
    fn sanitized_host_is_reported() {
        let (args, global) = parse(&[
            "relocate",
            "-f",
            "https://ov.example.org/",
            "-p",
            "pw",
            "-x",
            "in.csv",
        ]);
        let r = resolve(&args, &global, &Config::default(), no_prompt).unwrap();

        assert_eq!(r.controller.hostname.as_str(), "ov.example.org");
        assert_eq!(r.rewritten_from.as_deref(), Some("https://ov.example.org/"));
    }

    #[test]
    fn bad_host_fails_before_prompting() {
        let (args, global) = parse(&["relocate", "-i", "10.0.0.5:8443", "-x", "in.csv"]);
        let err = resolve(&args, &global, &Config::default(), no_prompt).unwrap_err();
        assert!(matches!(err, CliError::InvalidHostname(_)));
    }

    #[test]
    fn missing_host_is_a_usage_error() {
        let (args, global) = parse(&["relocate", "-p", "pw", "-x", "in.csv"]);
        let err = resolve(&args, &global, &Config::default(), no_prompt).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "controller"),
            "{err:?}"
        );
    }

    #[test]
    fn profile_fills_gaps_and_flags_win() {
        let (args, global) = parse(&[
            "--profile",
            "lab",
            "relocate",
            "-u",
            "me",
            "-k",
            "-x",
            "in.csv",
        ]);
        let r = resolve(&args, &global, &lab_config(), no_prompt).unwrap();

        assert_eq!(r.controller.hostname.as_str(), "ov.lab.example");
        assert_eq!(r.controller.credential.username, "me");
        assert_eq!(r.controller.tls, TlsPolicy::Insecure);
    }

    #[test]
    fn profile_can_require_certificate_checks() {
        let (args, global) = parse(&["--profile", "lab", "relocate", "-x", "in.csv"]);
        let r = resolve(&args, &global, &lab_config(), no_prompt).unwrap();
        assert_eq!(r.controller.tls, TlsPolicy::Validate);
        assert_eq!(r.controller.credential.username, "ops");
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let (args, global) = parse(&["--profile", "prod", "relocate", "-x", "in.csv"]);
        let err = resolve(&args, &global, &lab_config(), no_prompt).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(aploc_config::ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn prompt_is_used_when_nothing_else_is_set() {
        let (args, global) = parse(&["relocate", "-i", "10.0.0.5", "-x", "in.csv"]);
        // Skip when the caller's environment already supplies a password.
        if std::env::var_os(aploc_config::PASSWORD_ENV).is_some() {
            return;
        }
        let r = resolve(&args, &global, &Config::default(), |text| {
            assert_eq!(text, "Password for admin@10.0.0.5: ");
            Ok(SecretString::from("typed".to_owned()))
        })
        .unwrap();
        assert_eq!(r.controller.credential.password.expose_secret(), "typed");
    }

    #[test]
    fn delimiter_rules() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let (args, global) = parse(&[
            "--timeout",
            "0",
            "relocate",
            "-i",
            "h",
            "-p",
            "pw",
            "-x",
            "f",
        ]);
        let err = resolve(&args, &global, &Config::default(), no_prompt).unwrap_err();
        assert!(
            matches!(err, CliError::Validation { ref field, .. } if field == "timeout"),
            "{err:?}"
        );
    }
}
