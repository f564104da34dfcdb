//! Additive noise sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Noise dither variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    /// Uniform white noise.
    Random,
    /// Interleaved gradient noise: deterministic, spatially decorrelated.
    #[default]
    BlueNoise,
}

/// Peak-to-peak noise span at factor 1.0.
///
/// Kept below 255 so full-strength noise cannot push pure black or pure white
/// across the default threshold of 128.
pub const NOISE_AMPLITUDE: f32 = 253.0;

/// Interleaved gradient noise in `[0, 1)`.
///
/// `frac(52.9829189 × frac(0.06711056·x + 0.00583715·y))`
#[inline]
pub fn interleaved_gradient_noise(x: usize, y: usize) -> f32 {
    let inner = 0.06711056 * x as f64 + 0.00583715 * y as f64;
    let value = 52.9829189 * inner.fract();
    value.fract() as f32
}

/// Per-invocation noise generator.
///
/// Random noise draws from a seeded [`StdRng`] when a seed is given and from
/// OS entropy otherwise.
#[derive(Debug)]
pub struct NoiseSource {
    kind: NoiseKind,
    rng: StdRng,
}

impl NoiseSource {
    pub fn new(kind: NoiseKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { kind, rng }
    }

    /// Next sample in `[0, 1)` for pixel `(x, y)`.
    #[inline]
    pub fn sample(&mut self, x: usize, y: usize) -> f32 {
        match self.kind {
            NoiseKind::Random => self.rng.gen::<f32>(),
            NoiseKind::BlueNoise => interleaved_gradient_noise(x, y),
        }
    }

    /// Zero-centered offset `(u − 0.5) × factor × NOISE_AMPLITUDE`.
    #[inline]
    pub fn offset(&mut self, x: usize, y: usize, factor: f32) -> f32 {
        (self.sample(x, y) - 0.5) * factor * NOISE_AMPLITUDE
    }
}
