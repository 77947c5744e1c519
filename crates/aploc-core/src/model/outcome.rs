// ── Row and outcome types ──

use strum::{AsRefStr, Display};

use super::device::DeviceRecord;

/// One line of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// Hardware identifier as written in the file (usually a MAC).
    pub identifier: String,
    pub new_location: String,
}

impl InputRow {
    pub fn new(identifier: impl Into<String>, new_location: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            new_location: new_location.into(),
        }
    }
}

/// Terminal state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RowResult {
    Success,
    Failed,
    NotFound,
}

/// The durable record of what happened to one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub identifier: String,
    pub old_location: String,
    pub new_location: String,
    pub result: RowResult,
}

impl OutcomeRecord {
    /// The identifier did not resolve; both location columns stay empty.
    pub fn not_found(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            old_location: String::new(),
            new_location: String::new(),
            result: RowResult::NotFound,
        }
    }

    /// An update for `row` was attempted against `record`.
    ///
    /// The identifier is the controller's spelling from `record`, which may
    /// differ in case or separators from what the input file held.
    pub fn attempted(row: &InputRow, record: &DeviceRecord, success: bool) -> Self {
        Self {
            identifier: record.identifier.clone(),
            old_location: record.current_location.clone(),
            new_location: row.new_location.clone(),
            result: if success {
                RowResult::Success
            } else {
                RowResult::Failed
            },
        }
    }

    /// Report columns, in header order.
    pub fn columns(&self) -> [&str; 4] {
        [
            &self.identifier,
            &self.old_location,
            &self.new_location,
            self.result.as_ref(),
        ]
    }
}
