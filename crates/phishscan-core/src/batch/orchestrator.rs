//! Sequential batch orchestrator.
//!
//! One worker, one item in flight. The aggregate lives behind a std mutex that
//! is never held across an `.await`; every transition is made under the lock,
//! so a snapshot never shows progress that disagrees with the item states.
//! A generation counter separates batches: a worker whose batch was reset or
//! replaced discards its in-flight result and exits without touching state.
//! A new worker is not started until the previous one has returned, so a
//! stale analysis never overlaps the next batch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Notify};

use crate::ingest;
use crate::scorer::{AnalysisError, AnalysisResult, Scorer};

use super::error::BatchError;
use super::event::{BatchEvent, RunOutcome};
use super::export::{completed_rows, ExportRow};
use super::item::ItemState;
use super::progress::ProgressStats;
use super::run::BatchRun;

struct Shared {
    run: BatchRun,
    generation: u64,
    /// Generation of the worker currently dispatching items, if any.
    worker: Option<u64>,
    /// A worker task is inside `start()`, possibly still awaiting a stale
    /// analysis after its batch was reset or replaced.
    active: bool,
}

/// Drives a [`Scorer`] over a batch of URLs. Cheap to clone; clones share the
/// same batch, so one handle can `pause()` while another awaits `start()`.
#[derive(Clone)]
pub struct BatchOrchestrator {
    scorer: Arc<dyn Scorer>,
    shared: Arc<Mutex<Shared>>,
    events: Option<mpsc::Sender<BatchEvent>>,
    item_timeout: Option<Duration>,
    /// Signalled when the active worker leaves `start()`.
    drained: Arc<Notify>,
}

/// Releases the worker slot when `start()` returns or its future is dropped.
struct WorkerSlot<'a> {
    orch: &'a BatchOrchestrator,
    generation: u64,
}

impl Drop for WorkerSlot<'_> {
    fn drop(&mut self) {
        {
            let mut shared = self.orch.lock();
            shared.active = false;
            if shared.worker == Some(self.generation) {
                shared.worker = None;
            }
        }
        self.orch.drained.notify_waiters();
    }
}

impl BatchOrchestrator {
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        Self {
            scorer,
            shared: Arc::new(Mutex::new(Shared {
                run: BatchRun::default(),
                generation: 0,
                worker: None,
                active: false,
            })),
            events: None,
            item_timeout: None,
            drained: Arc::new(Notify::new()),
        }
    }

    /// Publishes every transition to `tx`. Sends wait for capacity, so the run
    /// does not move past an event until the channel has accepted it.
    pub fn with_events(mut self, tx: mpsc::Sender<BatchEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Fails an item with [`AnalysisError::Timeout`] when the scorer takes longer than `timeout`.
    pub fn with_item_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.item_timeout = timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn publish(&self, event: BatchEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).await.is_err() {
                tracing::debug!("batch event receiver dropped");
            }
        }
    }

    /// Replaces the current batch with the URL candidates found in `lines`.
    ///
    /// Blank and dotless lines are dropped. Fails with [`BatchError::EmptyBatch`]
    /// (leaving the current batch untouched) when nothing remains.
    pub fn submit<I, S>(&self, lines: I) -> Result<BatchRun, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = ingest::parse_lines(lines);
        if urls.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        let count = urls.len();
        let mut shared = self.lock();
        shared.generation += 1;
        shared.worker = None;
        shared.run = BatchRun::new(urls);
        tracing::info!(count, generation = shared.generation, "batch submitted");
        Ok(shared.run.clone())
    }

    /// Consistent copy of the batch.
    pub fn snapshot(&self) -> BatchRun {
        self.lock().run.clone()
    }

    /// Stops dispatching after the in-flight item (if any) completes.
    pub fn pause(&self) {
        let mut shared = self.lock();
        shared.run.set_flags(false, true);
        tracing::info!(generation = shared.generation, "batch paused");
    }

    /// Clears the batch. A worker mid-item drops its result when it returns.
    pub fn reset(&self) {
        let mut shared = self.lock();
        shared.generation += 1;
        shared.worker = None;
        shared.run = BatchRun::default();
        tracing::info!(generation = shared.generation, "batch reset");
    }

    /// One row per completed item, in batch order.
    pub fn export_completed(&self) -> Vec<ExportRow> {
        completed_rows(self.lock().run.items())
    }

    /// Processes pending items in order until none remain, the batch is paused,
    /// or it is reset. Resuming after a pause continues from the first pending item.
    ///
    /// If a worker from a reset or replaced batch is still awaiting its last
    /// analysis, this waits for it to return before dispatching anything.
    pub async fn start(&self) -> Result<RunOutcome, BatchError> {
        let generation = loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut shared = self.lock();
                if shared.run.is_empty() {
                    return Err(BatchError::EmptyBatch);
                }
                if shared.run.is_running() {
                    return Ok(RunOutcome::AlreadyRunning);
                }
                if shared.worker == Some(shared.generation) {
                    shared.run.set_flags(true, false);
                    tracing::info!("batch resumed; in-flight worker continues");
                    return Ok(RunOutcome::Resumed);
                }
                if !shared.active {
                    shared.run.set_flags(true, false);
                    shared.worker = Some(shared.generation);
                    shared.active = true;
                    break shared.generation;
                }
            }
            tracing::debug!("waiting for previous worker to drain");
            notified.await;
        };
        let _slot = WorkerSlot {
            orch: self,
            generation,
        };
        tracing::info!(generation, "batch run started");

        let outcome = self.run_loop(generation).await;
        tracing::info!(generation, ?outcome, "batch run stopped");
        self.publish(BatchEvent::Stopped { outcome }).await;
        Ok(outcome)
    }

    async fn run_loop(&self, generation: u64) -> RunOutcome {
        let started = Instant::now();
        let mut processed = 0usize;

        loop {
            let (index, url) = {
                let mut shared = self.lock();
                if shared.generation != generation {
                    return RunOutcome::Reset;
                }
                if !shared.run.is_running() {
                    shared.worker = None;
                    return RunOutcome::Paused;
                }
                let Some(index) = shared.run.next_pending() else {
                    shared.run.set_flags(false, false);
                    shared.worker = None;
                    return RunOutcome::Finished;
                };
                let Some(item) = shared.run.item_mut(index) else {
                    shared.worker = None;
                    return RunOutcome::Finished;
                };
                item.set_state(ItemState::Analyzing);
                (index, item.url().to_string())
            };
            tracing::debug!(index, url = %url, "analyzing");
            self.publish(BatchEvent::ItemStarted {
                index,
                url: url.clone(),
            })
            .await;

            let item_start = Instant::now();
            let outcome = self.analyze_one(&url).await;
            let elapsed_secs = item_start.elapsed().as_secs_f64();

            let (item, progress) = {
                let mut shared = self.lock();
                if shared.generation != generation {
                    tracing::debug!(index, "discarding result from replaced batch");
                    return RunOutcome::Reset;
                }
                let state = match outcome {
                    Ok(result) => ItemState::Completed {
                        result,
                        elapsed_secs,
                    },
                    Err(e) => {
                        tracing::warn!(index, url = %url, "analysis failed: {}", e);
                        ItemState::Errored {
                            error: e.to_string(),
                            elapsed_secs,
                        }
                    }
                };
                let Some(item) = shared.run.item_mut(index) else {
                    return RunOutcome::Reset;
                };
                item.set_state(state);
                let item = item.clone();
                processed += 1;
                let progress = ProgressStats {
                    counts: shared.run.counts(),
                    processed_this_run: processed,
                    elapsed_secs: started.elapsed().as_secs_f64(),
                };
                (item, progress)
            };
            tracing::debug!(
                index,
                status = item.status().as_str(),
                elapsed_secs,
                percent = progress.percent(),
                "item finished"
            );
            self.publish(BatchEvent::ItemFinished { index, item }).await;
            self.publish(BatchEvent::Progress(progress)).await;
        }
    }

    async fn analyze_one(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        match self.item_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.scorer.analyze(url)).await {
                Ok(res) => res,
                Err(_) => Err(AnalysisError::Timeout(limit)),
            },
            None => self.scorer.analyze(url).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ItemStatus;
    use crate::scorer::HeuristicScorer;

    fn orchestrator() -> BatchOrchestrator {
        BatchOrchestrator::new(Arc::new(HeuristicScorer::default()))
    }

    #[test]
    fn submit_filters_and_creates_pending_items() {
        let orch = orchestrator();
        let run = orch
            .submit(["https://a.example", "", "junk", " http://b.example "])
            .unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run.items()[1].url(), "http://b.example");
        assert!(run.items().iter().all(|i| i.status() == ItemStatus::Pending));
    }

    #[test]
    fn submit_of_only_blank_lines_is_empty_batch() {
        let orch = orchestrator();
        assert_eq!(
            orch.submit(["", "not a url", " "]).unwrap_err(),
            BatchError::EmptyBatch
        );
        assert!(orch.snapshot().is_empty());
    }

    #[test]
    fn failed_submit_keeps_previous_batch() {
        let orch = orchestrator();
        orch.submit(["https://a.example"]).unwrap();
        assert!(orch.submit([""]).is_err());
        assert_eq!(orch.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn start_on_empty_batch_fails() {
        assert_eq!(
            orchestrator().start().await.unwrap_err(),
            BatchError::EmptyBatch
        );
    }

    #[tokio::test]
    async fn run_completes_every_item_in_order() {
        let orch = orchestrator();
        orch.submit(["https://example.com/login", "http://bit.ly/fake-link"])
            .unwrap();
        assert_eq!(orch.start().await.unwrap(), RunOutcome::Finished);
        let run = orch.snapshot();
        assert!(!run.is_running());
        assert_eq!(run.counts().completed, 2);
        assert_eq!(run.progress_percent(), 100.0);
        assert_eq!(run.items()[1].result().unwrap().risk_score(), 70);
        assert_eq!(orch.export_completed().len(), 2);
    }

    struct FailOn(&'static str);

    #[async_trait::async_trait]
    impl Scorer for FailOn {
        async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
            if url.contains(self.0) {
                Err(AnalysisError::Failure("lookup failed".into()))
            } else {
                Ok(AnalysisResult::new(url, 10, vec![]))
            }
        }
    }

    #[tokio::test]
    async fn scorer_failure_is_isolated_to_its_item() {
        let orch = BatchOrchestrator::new(Arc::new(FailOn("broken")));
        orch.submit(["https://a.example", "https://broken.example", "https://c.example"])
            .unwrap();
        assert_eq!(orch.start().await.unwrap(), RunOutcome::Finished);
        let run = orch.snapshot();
        let statuses: Vec<_> = run.items().iter().map(|i| i.status()).collect();
        assert_eq!(
            statuses,
            vec![ItemStatus::Completed, ItemStatus::Errored, ItemStatus::Completed]
        );
        assert_eq!(
            run.items()[1].error(),
            Some("analysis failed: lookup failed")
        );
        assert!(run.items()[1].elapsed_secs().is_some());
        assert_eq!(run.counts().errored, 1);
        assert_eq!(orch.export_completed().len(), 2);
    }

    struct Slow;

    #[async_trait::async_trait]
    impl Scorer for Slow {
        async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(AnalysisResult::new(url, 0, vec![]))
        }
    }

    #[tokio::test]
    async fn timeout_marks_item_errored() {
        let orch = BatchOrchestrator::new(Arc::new(Slow))
            .with_item_timeout(Some(Duration::from_millis(20)));
        orch.submit(["https://a.example"]).unwrap();
        orch.start().await.unwrap();
        let run = orch.snapshot();
        assert_eq!(run.items()[0].status(), ItemStatus::Errored);
        assert!(run.items()[0].error().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let orch = orchestrator();
        orch.submit(["https://a.example"]).unwrap();
        orch.start().await.unwrap();
        orch.reset();
        let run = orch.snapshot();
        assert!(run.is_empty());
        assert_eq!(run.progress_percent(), 0.0);
        assert!(!run.is_running() && !run.is_paused());
        assert!(orch.export_completed().is_empty());
    }

    #[tokio::test]
    async fn events_published_in_order() {
        let (tx, mut rx) = mpsc::channel(64);
        let orch = orchestrator().with_events(tx);
        orch.submit(["https://a.example", "https://b.example"]).unwrap();
        orch.start().await.unwrap();
        drop(orch);

        let mut kinds = Vec::new();
        while let Some(ev) = rx.recv().await {
            kinds.push(match ev {
                BatchEvent::ItemStarted { index, .. } => format!("start{index}"),
                BatchEvent::ItemFinished { index, .. } => format!("finish{index}"),
                BatchEvent::Progress(p) => format!("progress{}", p.percent() as u32),
                BatchEvent::Stopped { outcome } => format!("stopped:{outcome:?}"),
            });
        }
        assert_eq!(
            kinds,
            vec![
                "start0",
                "finish0",
                "progress50",
                "start1",
                "finish1",
                "progress100",
                "stopped:Finished"
            ]
        );
    }
}
