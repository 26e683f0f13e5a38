//! Result of analyzing one URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::UrlFeatureSet;

use super::classification::Classification;

/// One analyzed URL. The classification is derived from the score at
/// construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    url: String,
    risk_score: u8,
    classification: Classification,
    contributing_signals: Vec<String>,
    computed_at: DateTime<Utc>,
    features: Option<UrlFeatureSet>,
}

impl AnalysisResult {
    /// Builds a result; scores above 100 are clamped.
    pub fn new(url: impl Into<String>, risk_score: u8, contributing_signals: Vec<String>) -> Self {
        let risk_score = risk_score.min(100);
        Self {
            url: url.into(),
            risk_score,
            classification: Classification::from_score(risk_score),
            contributing_signals,
            computed_at: Utc::now(),
            features: None,
        }
    }

    /// Attaches the feature breakdown the score was computed from.
    pub fn with_features(mut self, features: UrlFeatureSet) -> Self {
        self.features = Some(features);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn contributing_signals(&self) -> &[String] {
        &self.contributing_signals
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    pub fn features(&self) -> Option<&UrlFeatureSet> {
        self.features.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_follows_score() {
        let r = AnalysisResult::new("https://a.example", 69, vec![]);
        assert_eq!(r.classification(), Classification::Suspicious);
        let r = AnalysisResult::new("https://a.example", 70, vec![]);
        assert_eq!(r.classification(), Classification::Dangerous);
    }

    #[test]
    fn score_clamped_to_100() {
        let r = AnalysisResult::new("http://x.example", 250, vec!["x".into()]);
        assert_eq!(r.risk_score(), 100);
        assert_eq!(r.classification(), Classification::Dangerous);
    }

    #[test]
    fn serializes_lowercase_classification() {
        let r = AnalysisResult::new("https://a.example", 10, vec![]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["classification"], "safe");
        assert_eq!(json["risk_score"], 10);
        assert!(json["features"].is_null());
    }
}
