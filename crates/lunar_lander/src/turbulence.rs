//! Seeded per-tick turbulence

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lander_engine::foundation::math::Vec3;

use crate::config::TurbulenceConfig;

/// Draws one random impulse per tick from the configured ranges
#[derive(Debug, Clone)]
pub struct TurbulenceSource {
    rng: StdRng,
    config: TurbulenceConfig,
}

impl TurbulenceSource {
    /// Create a source; the same seed always yields the same sequence
    pub fn new(config: TurbulenceConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Restart the sequence
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Next impulse; zero when disabled
    pub fn sample(&mut self) -> Vec3 {
        if !self.config.enabled {
            return Vec3::zeros();
        }
        let horizontal = self.config.horizontal;
        let vertical = self.config.vertical;
        Vec3::new(
            self.rng.gen_range(-horizontal..=horizontal),
            self.rng.gen_range(-vertical..=vertical),
            self.rng.gen_range(-horizontal..=horizontal),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_within_ranges() {
        let mut source = TurbulenceSource::new(TurbulenceConfig::default(), 42);
        for _ in 0..1_000 {
            let v = source.sample();
            assert!(v.x.abs() <= 0.13 && v.z.abs() <= 0.13);
            assert!(v.y.abs() <= 0.01);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TurbulenceSource::new(TurbulenceConfig::default(), 9);
        let mut b = TurbulenceSource::new(TurbulenceConfig::default(), 9);
        let first: Vec<Vec3> = (0..10).map(|_| a.sample()).collect();
        let second: Vec<Vec3> = (0..10).map(|_| b.sample()).collect();
        assert_eq!(first, second);

        a.reseed(9);
        assert_eq!(a.sample(), first[0]);
    }

    #[test]
    fn test_disabled_is_zero() {
        let config = TurbulenceConfig { enabled: false, ..TurbulenceConfig::default() };
        let mut source = TurbulenceSource::new(config, 1);
        assert_eq!(source.sample(), Vec3::zeros());
    }

    #[test]
    fn test_zero_range_is_zero() {
        let config = TurbulenceConfig { enabled: true, horizontal: 0.0, vertical: 0.0 };
        let mut source = TurbulenceSource::new(config, 1);
        assert_eq!(source.sample(), Vec3::zeros());
    }
}
