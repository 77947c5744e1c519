// ── Run orchestration ──
//
// open input → login → create results file → batch → logout.
// The input is opened and sniffed before any request goes out, so a bad
// path fails without touching the controller. Once a session exists it is
// closed exactly once, even when the batch aborts.

use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::batch::{BatchSummary, run_batch};
use crate::config::{ControllerConfig, Credential, JobConfig};
use crate::controller::{ControllerApi, connect};
use crate::error::CoreError;
use crate::input::InputReader;
use crate::report::{OutcomeWriter, output_file_name};
use crate::session::{close_session, open_session};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: BatchSummary,
    /// Path of the results file.
    pub output: PathBuf,
    /// Whether the first input line was skipped as a header.
    pub header_skipped: bool,
}

/// Run a full batch against the OmniVista controller in `controller`.
pub async fn run(controller: &ControllerConfig, job: &JobConfig) -> Result<RunReport, CoreError> {
    let api = connect(controller)?;
    run_with(&api, &controller.credential, job).await
}

/// Run a full batch against any [`ControllerApi`].
pub async fn run_with<A: ControllerApi>(
    api: &A,
    credential: &Credential,
    job: &JobConfig,
) -> Result<RunReport, CoreError> {
    let started = Local::now();

    let input = InputReader::open(&job.input, job.delimiter)?;
    let header_skipped = input.header_skipped();

    let session = open_session(api, credential).await?;

    let output = job.output_dir.join(output_file_name(started));
    let outcome = async {
        let mut writer = OutcomeWriter::create(&output, job.delimiter)?;
        info!(path = %output.display(), "writing results");
        run_batch(api, &session, input, &mut writer).await
    }
    .await;

    close_session(api, &session).await;

    Ok(RunReport {
        summary: outcome?,
        output,
        header_skipped,
    })
}
