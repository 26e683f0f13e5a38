//! Error type of a single URL analysis.

use std::time::Duration;
use thiserror::Error;

/// Why an analysis produced no result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Structurally unusable input (blank, or no `.` and not an absolute URL with a host).
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),
    /// The analyze capability itself failed (e.g. a downstream lookup).
    #[error("analysis failed: {0}")]
    Failure(String),
    /// The analysis did not finish within the per-item timeout.
    #[error("analysis timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),
}
