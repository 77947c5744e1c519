//! `aploc relocate`: resolve configuration, run the batch, print a summary.

use secrecy::SecretString;
use tracing::debug;

use crate::cli::{GlobalOpts, RelocateArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: &RelocateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let resolved = config::resolve(args, global, &cfg, prompt_password)?;

    if let Some(ref given) = resolved.rewritten_from {
        output::notice(
            &format!(
                "Hostname {given:?} has been changed to {:?}",
                resolved.controller.hostname.as_str()
            ),
            global.quiet,
        );
    }

    debug!(
        host = %resolved.controller.hostname,
        tls = ?resolved.controller.tls,
        input = %resolved.job.input.display(),
        "starting run"
    );

    let report = aploc_core::run(&resolved.controller, &resolved.job).await?;

    if report.header_skipped {
        output::notice("Header row detected and skipped", global.quiet);
    }

    let rendered = output::render_summary(&report, output::should_color());
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn prompt_password(text: &str) -> Result<SecretString, CliError> {
    rpassword::prompt_password(text)
        .map(SecretString::from)
        .map_err(|e| CliError::Validation {
            field: "password".into(),
            reason: format!("no password given and prompting failed: {e}"),
        })
}
