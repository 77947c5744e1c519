//! Row-reconciliation workflow for bulk access-point location updates.
//!
//! This crate sits between `aploc-api` and the `aploc` binary and owns the
//! whole batch run:
//!
//! - **[`run()`]** opens the input, logs in once, settles every row in
//!   order and logs out, writing one outcome line per row as it goes.
//!   [`run_with()`] does the same against any [`ControllerApi`].
//!
//! - **[`ControllerApi`]** is the seam to the controller: login, logout,
//!   device lookup and update submission, all in domain types.
//!
//! - **[`compose()`]** merges a new location into a fetched
//!   [`DeviceRecord`], keeping the optional RF profile and geo-location
//!   only when they are set.
//!
//! - **[`InputReader`]** / **[`OutcomeWriter`]** handle the delimited
//!   input (with header detection) and the timestamped results file.
//!
//! - **[`Hostname`]** sanitizes operator-supplied controller addresses.

pub mod batch;
pub mod compose;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod hostname;
pub mod input;
pub mod model;
pub mod report;
pub mod runner;
pub mod session;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use batch::{BatchSummary, process_row, run_batch};
pub use compose::compose;
pub use config::{ControllerConfig, Credential, JobConfig, TlsPolicy};
pub use controller::{ControllerApi, connect};
pub use error::CoreError;
pub use hostname::{Hostname, HostnameError};
pub use input::{InputReader, has_header};
pub use model::{DeviceRecord, InputRow, OutcomeRecord, RowResult, UpdatePayload, UpdateResult};
pub use report::{OutcomeSink, OutcomeWriter, output_file_name};
pub use runner::{RunReport, run, run_with};
pub use session::{close_session, open_session};

pub use aploc_api::Session;
