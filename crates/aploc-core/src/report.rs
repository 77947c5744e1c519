// ── Outcome reporting ──
//
// One outcome line per input row, written and flushed as soon as the row
// settles so a crash mid-batch still leaves an accurate partial report.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::CoreError;
use crate::model::OutcomeRecord;

/// Header line of the results file.
pub const HEADER: [&str; 4] = ["apMac", "apLocation-OLD", "apLocation-NEW", "Result"];

/// Destination for row outcomes.
pub trait OutcomeSink {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), CoreError>;
}

impl OutcomeSink for Vec<OutcomeRecord> {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), CoreError> {
        self.push(outcome.clone());
        Ok(())
    }
}

/// `results_<ddmmYYYY_HHMMSS>.csv` for a run started at `started`.
pub fn output_file_name(started: DateTime<Local>) -> String {
    format!("results_{}.csv", started.format("%d%m%Y_%H%M%S"))
}

/// Delimited outcome writer. The header is written on construction.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
}

impl<W: Write> std::fmt::Debug for OutcomeWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl OutcomeWriter<File> {
    /// Create (or truncate) the results file at `path`.
    pub fn create(path: impl AsRef<Path>, delimiter: u8) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CoreError::io(path, e))?;
        Self::new(file, path, delimiter)
    }
}

impl<W: Write> OutcomeWriter<W> {
    /// Wrap an arbitrary writer. `path` is only used in error messages.
    pub fn new(inner: W, path: impl AsRef<Path>, delimiter: u8) -> Result<Self, CoreError> {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(inner);

        let mut out = Self {
            writer,
            path: path.as_ref().to_path_buf(),
        };
        out.write_line(HEADER)?;
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, CoreError> {
        let path = self.path;
        self.writer.into_inner().map_err(|e| {
            let cause = e.error();
            CoreError::io(&path, std::io::Error::new(cause.kind(), cause.to_string()))
        })
    }

    fn write_line(&mut self, fields: [&str; 4]) -> Result<(), CoreError> {
        self.writer
            .write_record(fields)
            .map_err(|e| CoreError::csv(&self.path, e))?;
        self.writer
            .flush()
            .map_err(|e| CoreError::io(&self.path, e))
    }
}

impl<W: Write> OutcomeSink for OutcomeWriter<W> {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), CoreError> {
        self.write_line(outcome.columns())
    }
}
