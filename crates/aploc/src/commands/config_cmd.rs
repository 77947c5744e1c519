//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            // Printed even with --quiet; scripts ask for it explicitly.
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let rendered = aploc_config::redacted(&cfg)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { target } => {
            let cfg = config::load_config()?;
            let profile_name = target
                .or_else(|| cfg.active_profile_name(global.profile.as_deref()))
                .ok_or_else(|| CliError::Validation {
                    field: "profile".into(),
                    reason: "name one with --for or --profile, or set default_profile".into(),
                })?;

            let password =
                rpassword::prompt_password(format!("Password for profile '{profile_name}': "))
                    .map_err(|e| CliError::Validation {
                        field: "password".into(),
                        reason: format!("prompt failed: {e}"),
                    })?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "cannot be empty".into(),
                });
            }

            aploc_config::store_password(&profile_name, &password)?;
            output::notice(
                &format!("✓ Password stored in system keyring for profile '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
