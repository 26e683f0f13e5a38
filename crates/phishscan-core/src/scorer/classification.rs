//! Three-tier bucketing of a risk score.

use serde::Serialize;
use std::fmt;

/// Scores below this are `Safe`.
pub const SUSPICIOUS_THRESHOLD: u8 = 30;
/// Scores at or above this are `Dangerous`.
pub const DANGEROUS_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Safe,
    Suspicious,
    Dangerous,
}

impl Classification {
    /// `score < 30` → Safe, `30 <= score < 70` → Suspicious, `score >= 70` → Dangerous.
    pub fn from_score(score: u8) -> Self {
        if score < SUSPICIOUS_THRESHOLD {
            Classification::Safe
        } else if score < DANGEROUS_THRESHOLD {
            Classification::Suspicious
        } else {
            Classification::Dangerous
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Safe => "safe",
            Classification::Suspicious => "suspicious",
            Classification::Dangerous => "dangerous",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
