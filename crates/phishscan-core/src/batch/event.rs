//! Events published by the orchestrator while a batch runs.

use serde::Serialize;

use super::item::BatchItem;
use super::progress::ProgressStats;

/// How a call to `start()` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// No pending items remain.
    Finished,
    /// Stopped at an item boundary after `pause()`.
    Paused,
    /// The batch was reset or replaced while running; in-flight output was discarded.
    Reset,
    /// The batch was already running; nothing was done.
    AlreadyRunning,
    /// A worker still finishing its in-flight item after a pause was told to carry on.
    Resumed,
}

/// Published in order, each before the orchestrator moves on.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchEvent {
    ItemStarted { index: usize, url: String },
    ItemFinished { index: usize, item: BatchItem },
    Progress(ProgressStats),
    Stopped { outcome: RunOutcome },
}
