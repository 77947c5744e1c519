// ── Domain model ──
//
// Per-row data: the input row, the controller's view of the device, the
// update payload derived from both, and the outcome written to the report.

pub mod device;
pub mod outcome;

pub use device::{DeviceRecord, UpdatePayload, UpdateResult};
pub use outcome::{InputRow, OutcomeRecord, RowResult};
