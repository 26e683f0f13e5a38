//! Scorer stub whose analyses block until the test releases them.
//!
//! Each call records its URL, then waits for one permit. Tests drive a batch
//! item by item with `release(n)` and inspect the orchestrator in between.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use phishscan_core::batch::BatchEvent;
use phishscan_core::scorer::{AnalysisError, AnalysisResult, Scorer};
use tokio::sync::{mpsc, Semaphore};

pub struct GatedScorer {
    gate: Semaphore,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    /// URLs containing this substring fail with `AnalysisError::Failure`.
    fail_on: Option<&'static str>,
}

impl GatedScorer {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    pub fn failing_on(pattern: &'static str) -> Self {
        let mut scorer = Self::new();
        scorer.fail_on = Some(pattern);
        scorer
    }

    /// Lets `n` blocked (or future) analyses finish.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// URLs passed to `analyze`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scorer for GatedScorer {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| AnalysisError::Failure(e.to_string()))?;
        permit.forget();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.fail_on {
            Some(p) if url.contains(p) => Err(AnalysisError::Failure("stub failure".into())),
            _ => Ok(AnalysisResult::new(url, 42, vec!["stub".into()])),
        }
    }
}

/// Receives events until `ItemStarted` for `index` arrives.
pub async fn wait_for_start(rx: &mut mpsc::Receiver<BatchEvent>, index: usize) {
    while let Some(ev) = rx.recv().await {
        if let BatchEvent::ItemStarted { index: i, .. } = ev {
            if i == index {
                return;
            }
        }
    }
    panic!("event channel closed before item {index} started");
}

/// Five distinct URLs.
pub fn five_urls() -> Vec<String> {
    (1..=5)
        .map(|i| format!("https://site{i}.example.com/page"))
        .collect()
}
