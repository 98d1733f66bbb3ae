//! Seeded 2D simplex noise with fractal Brownian motion
//!
//! Wraps `noise::Simplex`. The crate only takes a 32-bit seed, so world seeds
//! are folded down; a noise instance stays a pure function of its seed.

use std::fmt;

use noise::{NoiseFn, Simplex};

/// Octave settings for `SimplexNoise::fbm`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm {
    pub octaves: u32,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Amplitude multiplier per octave
    pub persistence: f64,
}

impl Fbm {
    /// `octaves` with lacunarity 2 and persistence 0.5
    pub const fn octaves(octaves: u32) -> Self {
        Self {
            octaves,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

#[derive(Clone)]
pub struct SimplexNoise {
    seed: u64,
    source: Simplex,
}

impl fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexNoise").field("seed", &self.seed).finish()
    }
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            source: Simplex::new(fold_seed(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Single-octave noise in [-1, 1]
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        self.source.get([x, y])
    }

    /// Sum of octaves, normalized by the total amplitude
    pub fn fbm(&self, x: f64, y: f64, params: Fbm) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..params.octaves {
            value += amplitude * self.noise2d(x * frequency, y * frequency);
            max_value += amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        if max_value > 0.0 {
            value / max_value
        } else {
            0.0
        }
    }
}

/// Mix the high half into the low half
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_noise() {
        let a = SimplexNoise::new(42);
        let b = SimplexNoise::new(42);
        for k in 0..100 {
            let (x, y) = (k as f64 * 0.37, k as f64 * -0.91);
            assert_eq!(a.noise2d(x, y).to_bits(), b.noise2d(x, y).to_bits());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = SimplexNoise::new(1);
        let b = SimplexNoise::new(2);
        let differs = (0..50).any(|k| {
            let (x, y) = (k as f64 * 0.53 + 0.1, k as f64 * 0.29 + 0.2);
            a.noise2d(x, y) != b.noise2d(x, y)
        });
        assert!(differs);
    }

    #[test]
    fn test_fold_seed_uses_high_bits() {
        assert_eq!(fold_seed(7), 7);
        assert_ne!(fold_seed(1 << 40), fold_seed(0));
    }

    #[test]
    fn test_fbm_stays_in_noise_range() {
        let noise = SimplexNoise::new(11);
        for k in 0..200 {
            let v = noise.fbm(k as f64 * 0.13, k as f64 * 0.07, Fbm::octaves(4));
            assert!(v.abs() <= 1.0, "{} out of range", v);
        }
        assert_eq!(noise.fbm(1.5, 2.5, Fbm::octaves(0)), 0.0);
    }

    #[test]
    fn test_single_octave_fbm_is_raw_noise() {
        let noise = SimplexNoise::new(5);
        let (x, y) = (3.7, -1.2);
        assert_eq!(noise.fbm(x, y, Fbm::octaves(1)), noise.noise2d(x, y));
    }
}
