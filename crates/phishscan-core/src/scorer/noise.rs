//! Bounded noise term standing in for model uncertainty.
//!
//! A real classifier replaces this whole module; the heuristic scorer only
//! ever asks for a value in `[0, max]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::config::{NoiseConfig, NoiseMode};

/// Hard cap on the noise term. The Suspicious tier (30..=69) is 40 points
/// wide, so noise of at most 39 can never carry a Safe score to Dangerous.
pub const NOISE_CAP: u32 = 39;

/// Source of the noise term.
pub trait NoiseSource: Send + Sync {
    /// Returns a value in `[0, max]`.
    fn sample(&self, max: u32) -> u32;
}

/// Always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&self, _max: u32) -> u32 {
        0
    }
}

/// Reproducible noise: the same seed yields the same sequence.
#[derive(Debug)]
pub struct SeededNoise {
    rng: Mutex<StdRng>,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&self, max: u32) -> u32 {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(0..=max)
    }
}

/// Fresh noise from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNoise;

impl NoiseSource for RandomNoise {
    fn sample(&self, max: u32) -> u32 {
        rand::thread_rng().gen_range(0..=max)
    }
}

/// Builds the noise source selected by `[noise]` in config.
pub fn noise_from_config(cfg: &NoiseConfig) -> Box<dyn NoiseSource> {
    match cfg.mode {
        NoiseMode::None => Box::new(NoNoise),
        NoiseMode::Seeded => Box::new(SeededNoise::new(cfg.seed.unwrap_or(0))),
        NoiseMode::Random => Box::new(RandomNoise),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_noise_is_reproducible() {
        let a = SeededNoise::new(42);
        let b = SeededNoise::new(42);
        let xs: Vec<u32> = (0..16).map(|_| a.sample(NOISE_CAP)).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.sample(NOISE_CAP)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn samples_stay_in_range() {
        let seeded = SeededNoise::new(1);
        for _ in 0..200 {
            assert!(seeded.sample(10) <= 10);
            assert!(RandomNoise.sample(10) <= 10);
        }
        assert_eq!(RandomNoise.sample(0), 0);
    }

    #[test]
    fn cap_keeps_safe_scores_out_of_dangerous() {
        use crate::scorer::{DANGEROUS_THRESHOLD, SUSPICIOUS_THRESHOLD};
        let highest_safe = SUSPICIOUS_THRESHOLD as u32 - 1;
        assert!(highest_safe + NOISE_CAP < DANGEROUS_THRESHOLD as u32);
    }

    #[test]
    fn config_selects_source() {
        let cfg = NoiseConfig::default();
        assert_eq!(noise_from_config(&cfg).sample(30), 0);
    }
}
