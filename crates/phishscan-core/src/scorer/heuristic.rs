//! Additive rule engine over [`UrlFeatureSet`].
//!
//! Every rule that fires adds its weight to the score and one human-readable
//! signal to the result, so the explanation comes out of the same pass that
//! produced the number.

use async_trait::async_trait;

use crate::config::{PhishscanConfig, ScoringConfig};
use crate::features::{extract_features, KeywordDictionary, UrlFeatureSet};

use super::error::AnalysisError;
use super::noise::{noise_from_config, NoNoise, NoiseSource, NOISE_CAP};
use super::result::AnalysisResult;
use super::Scorer;

/// Score contributions and their signals, before noise and clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub base_score: u32,
    pub signals: Vec<String>,
}

/// Applies the rules in their fixed order: keywords, missing encryption,
/// subdomain depth, excessive length.
pub fn evaluate_rules(features: &UrlFeatureSet, weights: &ScoringConfig) -> RuleOutcome {
    let mut base_score = 0u32;
    let mut signals = Vec::new();

    if features.suspicious_keyword_hits > 0 {
        base_score += weights.keyword_weight * features.suspicious_keyword_hits as u32;
        signals.push(format!(
            "Suspicious keywords detected ({}): {}",
            features.suspicious_keyword_hits,
            features.matched_keywords.join(", ")
        ));
    }

    if !features.uses_encrypted_transport {
        base_score += weights.missing_encryption_penalty;
        signals.push("No SSL encryption".to_string());
    }

    if features.subdomain_depth > 0 {
        base_score += weights.subdomain_penalty * features.subdomain_depth as u32;
        signals.push(format!(
            "Multiple subdomains (depth {})",
            features.subdomain_depth
        ));
    }

    if features.length > weights.length_threshold {
        base_score += weights.length_penalty;
        signals.push(format!(
            "Unusually long URL ({} characters)",
            features.length
        ));
    }

    RuleOutcome {
        base_score,
        signals,
    }
}

/// Rejects input the scorer cannot work with: blank strings, and strings with
/// no `.` that are not absolute URLs with a host (e.g. `http://localhost`).
pub fn validate_url(url: &str) -> Result<(), AnalysisError> {
    if url.trim().is_empty() {
        return Err(AnalysisError::InvalidUrl(url.to_string()));
    }
    if url.contains('.') {
        return Ok(());
    }
    match url::Url::parse(url) {
        Ok(parsed) if parsed.host_str().map_or(false, |h| !h.is_empty()) => Ok(()),
        _ => Err(AnalysisError::InvalidUrl(url.to_string())),
    }
}

/// Heuristic stand-in for a real classifier.
pub struct HeuristicScorer {
    weights: ScoringConfig,
    dictionary: KeywordDictionary,
    noise: Box<dyn NoiseSource>,
    noise_max: u32,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl HeuristicScorer {
    /// Deterministic scorer (no noise) with the given weights.
    pub fn new(weights: &ScoringConfig) -> Self {
        let dictionary = match &weights.keywords {
            Some(list) => KeywordDictionary::new(list),
            None => KeywordDictionary::default(),
        };
        Self {
            weights: weights.clone(),
            dictionary,
            noise: Box::new(NoNoise),
            noise_max: 0,
        }
    }

    /// Scorer with weights and noise taken from config.
    pub fn from_config(cfg: &PhishscanConfig) -> Self {
        Self::new(&cfg.scoring).with_noise(noise_from_config(&cfg.noise), cfg.noise.max)
    }

    /// Replaces the noise source; `max` is capped at [`NOISE_CAP`].
    pub fn with_noise(mut self, noise: Box<dyn NoiseSource>, max: u32) -> Self {
        self.noise = noise;
        self.noise_max = max.min(NOISE_CAP);
        self
    }

    pub fn dictionary(&self) -> &KeywordDictionary {
        &self.dictionary
    }

    /// Synchronous scoring; [`Scorer::analyze`] delegates here.
    pub fn score(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        validate_url(url)?;
        let features = extract_features(url, &self.dictionary);
        let outcome = evaluate_rules(&features, &self.weights);
        let noise = if self.noise_max > 0 {
            self.noise.sample(self.noise_max).min(self.noise_max)
        } else {
            0
        };
        let score = (outcome.base_score + noise).min(100) as u8;

        tracing::trace!(
            url,
            base = outcome.base_score,
            noise,
            score,
            "scored url"
        );

        Ok(AnalysisResult::new(url, score, outcome.signals).with_features(features))
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        self.score(url)
    }
}
