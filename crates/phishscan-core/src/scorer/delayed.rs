//! Scorer wrapper that simulates analysis latency.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::config::BatchConfig;

use super::error::AnalysisError;
use super::result::AnalysisResult;
use super::Scorer;

/// Sleeps for a random duration in `[min, max]` before delegating to `inner`.
pub struct DelayedScorer<S> {
    inner: S,
    min: Duration,
    max: Duration,
}

impl<S: Scorer> DelayedScorer<S> {
    pub fn new(inner: S, min: Duration, max: Duration) -> Self {
        Self {
            inner,
            min,
            max: max.max(min),
        }
    }

    /// Uses `simulated_delay_ms_min/max` from the `[batch]` section.
    pub fn from_config(inner: S, cfg: &BatchConfig) -> Self {
        Self::new(
            inner,
            Duration::from_millis(cfg.simulated_delay_ms_min),
            Duration::from_millis(cfg.simulated_delay_ms_max),
        )
    }

    fn pick_delay(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }
}

#[async_trait]
impl<S: Scorer> Scorer for DelayedScorer<S> {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        let delay = self.pick_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.inner.analyze(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::HeuristicScorer;
    use std::time::Instant;

    #[tokio::test]
    async fn delays_then_delegates() {
        let scorer = DelayedScorer::new(
            HeuristicScorer::default(),
            Duration::from_millis(20),
            Duration::from_millis(30),
        );
        let start = Instant::now();
        let r = scorer.analyze("http://bit.ly/fake-link").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(r.risk_score(), 70);
    }

    #[tokio::test]
    async fn zero_delay_from_default_config() {
        let scorer = DelayedScorer::from_config(HeuristicScorer::default(), &BatchConfig::default());
        assert_eq!(scorer.pick_delay(), Duration::ZERO);
        assert!(scorer.analyze("").await.is_err());
    }
}
