//! URL risk scoring.
//!
//! [`Scorer`] is the capability the batch orchestrator drives. The heuristic
//! implementation here is a stand-in; any classifier that implements the trait
//! can replace it without touching the orchestrator.

mod classification;
mod delayed;
mod error;
mod heuristic;
mod noise;
mod result;

pub use classification::{Classification, DANGEROUS_THRESHOLD, SUSPICIOUS_THRESHOLD};
pub use delayed::DelayedScorer;
pub use error::AnalysisError;
pub use heuristic::{evaluate_rules, validate_url, HeuristicScorer, RuleOutcome};
pub use noise::{noise_from_config, NoNoise, NoiseSource, RandomNoise, SeededNoise, NOISE_CAP};
pub use result::AnalysisResult;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PhishscanConfig;

/// Analyze capability: one URL in, one result or error out. May be slow.
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl<S: Scorer + ?Sized> Scorer for Arc<S> {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(url).await
    }
}

#[async_trait]
impl<S: Scorer + ?Sized> Scorer for Box<S> {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(url).await
    }
}

/// Heuristic scorer from config, wrapped in a [`DelayedScorer`] when a
/// simulated latency is configured.
pub fn scorer_from_config(cfg: &PhishscanConfig) -> Arc<dyn Scorer> {
    let heuristic = HeuristicScorer::from_config(cfg);
    if cfg.batch.simulated_delay_ms_max > 0 {
        Arc::new(DelayedScorer::from_config(heuristic, &cfg.batch))
    } else {
        Arc::new(heuristic)
    }
}
