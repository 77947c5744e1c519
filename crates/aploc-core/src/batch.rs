// ── Row reconciliation ──
//
// Each input row moves through resolve → compose → submit and settles in
// exactly one terminal state. Rows run strictly one after another in file
// order; the outcome is recorded before the next row starts.

use aploc_api::Session;
use tracing::{debug, info, warn};

use crate::compose::compose;
use crate::controller::ControllerApi;
use crate::error::CoreError;
use crate::model::{InputRow, OutcomeRecord, RowResult};
use crate::report::OutcomeSink;

/// Per-result row counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub not_found: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.not_found
    }

    fn tally(&mut self, result: RowResult) {
        match result {
            RowResult::Success => self.succeeded += 1,
            RowResult::Failed => self.failed += 1,
            RowResult::NotFound => self.not_found += 1,
        }
    }
}

/// Settle one row.
///
/// An unknown identifier short-circuits to `NOT_FOUND` without composing
/// or submitting anything. Errors are batch-fatal.
pub async fn process_row<A: ControllerApi>(
    api: &A,
    session: &Session,
    row: &InputRow,
) -> Result<OutcomeRecord, CoreError> {
    let Some(record) = api.resolve_device(session, &row.identifier).await? else {
        info!(identifier = %row.identifier, "device not found");
        return Ok(OutcomeRecord::not_found(&row.identifier));
    };

    debug!(
        identifier = %row.identifier,
        name = %record.display_name,
        current = %record.current_location,
        "device resolved"
    );

    let payload = compose(&record, &row.new_location);
    let result = api.submit_update(session, &payload).await?;

    if result.success {
        info!(
            identifier = %record.identifier,
            name = %record.display_name,
            location = %row.new_location,
            "location updated"
        );
    } else {
        warn!(
            identifier = %record.identifier,
            name = %record.display_name,
            location = %row.new_location,
            "location update rejected"
        );
    }

    Ok(OutcomeRecord::attempted(row, &record, result.success))
}

/// Settle every row in order, recording each outcome in `sink` as soon as
/// it is known.
///
/// Stops at the first error, whether it comes from the row source, the
/// controller or the sink. Outcomes already recorded stay recorded.
pub async fn run_batch<A, I, S>(
    api: &A,
    session: &Session,
    rows: I,
    sink: &mut S,
) -> Result<BatchSummary, CoreError>
where
    A: ControllerApi,
    I: IntoIterator<Item = Result<InputRow, CoreError>>,
    S: OutcomeSink,
{
    let mut summary = BatchSummary::default();

    for row in rows {
        let row = row?;
        let outcome = process_row(api, session, &row).await?;
        sink.record(&outcome)?;
        summary.tally(outcome.result);
    }

    info!(
        total = summary.total(),
        succeeded = summary.succeeded,
        failed = summary.failed,
        not_found = summary.not_found,
        "batch complete"
    );
    Ok(summary)
}
