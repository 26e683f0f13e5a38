//! Per-URL lifecycle inside a batch.

use serde::Serialize;

use crate::scorer::AnalysisResult;

/// Lifecycle of one batch item: `Pending → Analyzing → Completed | Errored`.
/// Terminal states carry the measured latency; only `Completed` carries a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ItemState {
    Pending,
    Analyzing,
    Completed {
        result: AnalysisResult,
        elapsed_secs: f64,
    },
    Errored {
        error: String,
        elapsed_secs: f64,
    },
}

/// Payload-free view of [`ItemState`], for counting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Analyzing,
    Completed,
    Errored,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Analyzing => "analyzing",
            ItemStatus::Completed => "completed",
            ItemStatus::Errored => "error",
        }
    }
}

impl ItemState {
    pub fn status(&self) -> ItemStatus {
        match self {
            ItemState::Pending => ItemStatus::Pending,
            ItemState::Analyzing => ItemStatus::Analyzing,
            ItemState::Completed { .. } => ItemStatus::Completed,
            ItemState::Errored { .. } => ItemStatus::Errored,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Completed { .. } | ItemState::Errored { .. })
    }
}

/// One submitted URL and where it is in its lifecycle. Only the orchestrator
/// changes the state; everyone else sees clones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    url: String,
    #[serde(flatten)]
    state: ItemState,
}

impl BatchItem {
    pub(crate) fn pending(url: String) -> Self {
        Self {
            url,
            state: ItemState::Pending,
        }
    }

    pub(crate) fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> &ItemState {
        &self.state
    }

    pub fn status(&self) -> ItemStatus {
        self.state.status()
    }

    /// Present iff the item completed.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ItemState::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Present iff the item completed or errored.
    pub fn elapsed_secs(&self) -> Option<f64> {
        match &self.state {
            ItemState::Completed { elapsed_secs, .. } | ItemState::Errored { elapsed_secs, .. } => {
                Some(*elapsed_secs)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ItemState::Errored { error, .. } => Some(error),
            _ => None,
        }
    }
}
