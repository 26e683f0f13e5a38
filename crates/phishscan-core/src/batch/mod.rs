//! Batch orchestration.
//!
//! Runs a scorer over an ordered list of URLs, one at a time and in
//! submission order, with live progress, cooperative pause, reset and
//! export of completed items.

mod error;
mod event;
mod export;
mod item;
mod orchestrator;
mod progress;
mod run;

pub use error::BatchError;
pub use event::{BatchEvent, RunOutcome};
pub use export::{
    completed_rows, default_export_filename, export_filename_for, to_csv, write_csv, ExportRow,
    CSV_HEADER,
};
pub use item::{BatchItem, ItemState, ItemStatus};
pub use orchestrator::BatchOrchestrator;
pub use progress::{BatchCounts, ProgressStats};
pub use run::BatchRun;
