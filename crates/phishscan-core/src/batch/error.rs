//! Errors surfaced by batch operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Ingestion left no URL to analyze (or the current batch is empty).
    #[error("batch contains no valid URLs")]
    EmptyBatch,
}
