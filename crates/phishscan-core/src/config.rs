use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Weights and thresholds for the heuristic scorer (`[scoring]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points added per suspicious keyword found in the URL.
    pub keyword_weight: u32,
    /// Points added when the scheme is not `https`.
    pub missing_encryption_penalty: u32,
    /// Points added per host label beyond `domain.tld`.
    pub subdomain_penalty: u32,
    /// Points added when the URL is longer than `length_threshold` characters.
    pub length_penalty: u32,
    pub length_threshold: usize,
    /// Replacement keyword dictionary; if missing, the built-in list is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 20,
            missing_encryption_penalty: 30,
            subdomain_penalty: 10,
            length_penalty: 15,
            length_threshold: 50,
            keywords: None,
        }
    }
}

/// Where the uncertainty term of the heuristic score comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// No noise: scores are a pure function of the URL.
    #[default]
    None,
    /// Reproducible noise from a seeded RNG.
    Seeded,
    /// Fresh noise on every call.
    Random,
}

/// Noise term settings (`[noise]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub mode: NoiseMode,
    /// Upper bound of the noise term in points. Values above 39 are capped.
    pub max: u32,
    /// Seed for `mode = "seeded"`; 0 when missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mode: NoiseMode::None,
            max: 30,
            seed: None,
        }
    }
}

/// Batch run settings (`[batch]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Per-item analysis timeout in seconds (None = wait indefinitely).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_timeout_secs: Option<f64>,
    /// Simulated analysis latency range in milliseconds (0..0 = none).
    pub simulated_delay_ms_min: u64,
    pub simulated_delay_ms_max: u64,
    /// Number of recent single-URL analyses kept for the recap.
    pub history_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            item_timeout_secs: None,
            simulated_delay_ms_min: 0,
            simulated_delay_ms_max: 0,
            history_size: 10,
        }
    }
}

impl BatchConfig {
    /// `item_timeout_secs` as a duration; non-positive, non-finite or
    /// unrepresentably large values mean no timeout.
    pub fn item_timeout(&self) -> Option<Duration> {
        self.item_timeout_secs
            .filter(|s| *s > 0.0)
            .and_then(|s| Duration::try_from_secs_f64(s).ok())
    }
}

/// Global configuration loaded from `~/.config/phishscan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhishscanConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl PhishscanConfig {
    /// Pretty TOML, as written by [`load_or_init`].
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PhishscanConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PhishscanConfig> {
    if !path.exists() {
        let default_cfg = PhishscanConfig::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: PhishscanConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
