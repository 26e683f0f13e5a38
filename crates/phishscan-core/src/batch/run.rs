//! The batch aggregate: items in submission order plus run flags.

use serde::Serialize;

use super::item::{BatchItem, ItemStatus};
use super::progress::BatchCounts;

/// One batch. Progress is always derived from the item states, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchRun {
    items: Vec<BatchItem>,
    is_running: bool,
    is_paused: bool,
}

impl BatchRun {
    pub(crate) fn new(urls: Vec<String>) -> Self {
        Self {
            items: urls.into_iter().map(BatchItem::pending).collect(),
            is_running: false,
            is_paused: false,
        }
    }

    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn counts(&self) -> BatchCounts {
        let mut counts = BatchCounts {
            total: self.items.len(),
            ..BatchCounts::default()
        };
        for item in &self.items {
            match item.status() {
                ItemStatus::Pending => counts.pending += 1,
                ItemStatus::Analyzing => counts.analyzing += 1,
                ItemStatus::Completed => counts.completed += 1,
                ItemStatus::Errored => counts.errored += 1,
            }
        }
        counts
    }

    pub fn progress_percent(&self) -> f64 {
        self.counts().percent()
    }

    pub(crate) fn set_flags(&mut self, running: bool, paused: bool) {
        self.is_running = running;
        self.is_paused = paused;
    }

    /// Index of the first item still pending.
    pub(crate) fn next_pending(&self) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.status() == ItemStatus::Pending)
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut BatchItem> {
        self.items.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::item::ItemState;

    fn run_of(n: usize) -> BatchRun {
        BatchRun::new((0..n).map(|i| format!("https://{i}.example.com")).collect())
    }

    #[test]
    fn new_run_is_all_pending() {
        let run = run_of(3);
        let c = run.counts();
        assert_eq!(c.total, 3);
        assert_eq!(c.pending, 3);
        assert_eq!(run.progress_percent(), 0.0);
        assert_eq!(run.next_pending(), Some(0));
        assert!(!run.is_running() && !run.is_paused());
    }

    #[test]
    fn progress_derived_from_states() {
        let mut run = run_of(4);
        run.item_mut(0).unwrap().set_state(ItemState::Errored {
            error: "x".into(),
            elapsed_secs: 0.1,
        });
        run.item_mut(1).unwrap().set_state(ItemState::Analyzing);
        assert!((run.progress_percent() - 25.0).abs() < 1e-9);
        assert_eq!(run.next_pending(), Some(2));
        let c = run.counts();
        assert_eq!((c.errored, c.analyzing, c.pending), (1, 1, 2));
    }

    #[test]
    fn empty_run() {
        let run = BatchRun::default();
        assert!(run.is_empty());
        assert_eq!(run.next_pending(), None);
        assert_eq!(run.progress_percent(), 0.0);
    }
}
