//! Bounded list of recent single-URL analyses, newest first.

use std::collections::VecDeque;

use crate::scorer::AnalysisResult;

#[derive(Debug, Clone)]
pub struct AnalysisHistory {
    entries: VecDeque<AnalysisResult>,
    capacity: usize,
}

impl Default for AnalysisHistory {
    fn default() -> Self {
        Self::new(10)
    }
}

impl AnalysisHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds a result at the front, dropping the oldest beyond capacity.
    pub fn record(&mut self, result: AnalysisResult) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
