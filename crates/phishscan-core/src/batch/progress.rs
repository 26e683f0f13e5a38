//! Progress reporting for a batch run (items done, rate, ETA).
//!
//! Consumers can compute rate = processed_this_run / elapsed_secs and
//! ETA = remaining / rate.

use serde::Serialize;

/// Per-status counts over the items of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    pub total: usize,
    pub pending: usize,
    pub analyzing: usize,
    pub completed: usize,
    pub errored: usize,
}

impl BatchCounts {
    /// Items in a terminal state (completed or errored).
    pub fn finished(&self) -> usize {
        self.completed + self.errored
    }

    /// `100 × finished / total`; 0 for an empty batch.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.finished() as f64 / self.total as f64
    }
}

/// Snapshot of batch progress (CLI-friendly).
#[derive(Debug, Clone, Serialize)]
pub struct ProgressStats {
    pub counts: BatchCounts,
    /// Items finished since the current `start()` call.
    pub processed_this_run: usize,
    /// Elapsed time since the current `start()` call (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    pub fn percent(&self) -> f64 {
        self.counts.percent()
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        (self.percent() / 100.0).min(1.0)
    }

    /// Items per second in the current run (0 if nothing measured yet).
    pub fn items_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.processed_this_run as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if the rate is unknown).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.counts.total.saturating_sub(self.counts.finished());
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.items_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }
}
