//! Palette extraction from image content.
//!
//! Every strategy is a pure function from a pixel sample to an ordered list
//! of colors. [`extract_palette`] guarantees exactly `k` colors, padding
//! with black when a strategy comes up short, so callers can always build a
//! well-formed [`Palette`](crate::Palette) from the result.
//!
//! # Example
//!
//! ```
//! use dither_core::{ExtractionMethod, PaletteExtractor, PixelBuffer};
//!
//! let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
//! let colors = PaletteExtractor::new(ExtractionMethod::MedianCut)
//!     .size(2)
//!     .extract(&buffer);
//! assert_eq!(colors.len(), 2);
//! ```

mod extreme;
mod farthest;
mod frequency;
mod hue;
mod kmeans;
mod median_cut;

use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Rgb;
use crate::output::PixelBuffer;
use crate::palette::MAX_PALETTE_SIZE;

/// Default cap on sampled opaque pixels.
pub const DEFAULT_SAMPLE_CAP: usize = 10_000;

/// Default number of extracted colors.
pub const DEFAULT_PALETTE_SIZE: usize = 8;

/// Color used to pad short results.
pub const PAD_COLOR: Rgb = Rgb::BLACK;

/// Palette extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMethod {
    /// Lloyd's k-means in Lab space.
    KMeans,
    /// Recursive split of the widest channel at its median.
    #[default]
    MedianCut,
    /// Most frequent 5-bit-per-channel colors.
    Frequency,
    /// Most populated 10° hue buckets.
    Hue,
    /// Lightness and saturation extremes.
    Extreme,
    /// Saturated mid-lightness colors.
    Pronounced,
    /// One color per hue region, spread across the wheel.
    Varied,
    /// Farthest-point sampling in Lab space.
    Distant,
    /// Farthest-point sampling by contrast ratio.
    Contrasting,
}

impl ExtractionMethod {
    pub const ALL: [ExtractionMethod; 9] = [
        ExtractionMethod::KMeans,
        ExtractionMethod::MedianCut,
        ExtractionMethod::Frequency,
        ExtractionMethod::Hue,
        ExtractionMethod::Extreme,
        ExtractionMethod::Pronounced,
        ExtractionMethod::Varied,
        ExtractionMethod::Distant,
        ExtractionMethod::Contrasting,
    ];

    /// Resolve a user-facing strategy name, ignoring case and separators.
    /// Unknown names fall back to [`ExtractionMethod::MedianCut`].
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "kmeans" | "lab" => ExtractionMethod::KMeans,
            "" | "mediancut" | "median" => ExtractionMethod::MedianCut,
            "frequency" | "histogram" => ExtractionMethod::Frequency,
            "hue" | "hueclustering" | "huecluster" => ExtractionMethod::Hue,
            "extreme" | "extremes" => ExtractionMethod::Extreme,
            "pronounced" => ExtractionMethod::Pronounced,
            "varied" => ExtractionMethod::Varied,
            "distant" => ExtractionMethod::Distant,
            "contrasting" | "contrast" => ExtractionMethod::Contrasting,
            _ => {
                tracing::warn!(method = name, "unknown extraction method, using median cut");
                ExtractionMethod::MedianCut
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExtractionMethod::KMeans => "kmeans",
            ExtractionMethod::MedianCut => "median-cut",
            ExtractionMethod::Frequency => "frequency",
            ExtractionMethod::Hue => "hue",
            ExtractionMethod::Extreme => "extreme",
            ExtractionMethod::Pronounced => "pronounced",
            ExtractionMethod::Varied => "varied",
            ExtractionMethod::Distant => "distant",
            ExtractionMethod::Contrasting => "contrasting",
        }
    }
}

/// Uniformly stride-sample the opaque pixels of `buffer`.
///
/// With `n` opaque pixels the stride is `ceil(n / cap)`, so at most `cap`
/// samples come back. A cap of zero is treated as one.
pub fn sample_pixels(buffer: &PixelBuffer, cap: usize) -> Vec<Rgb> {
    let cap = cap.max(1);
    let opaque = buffer.opaque_count();
    let stride = opaque.div_ceil(cap).max(1);

    buffer
        .pixels()
        .filter(|&(_, alpha)| alpha > 0)
        .step_by(stride)
        .map(|(color, _)| color)
        .collect()
}

/// Extract exactly `k` colors (clamped to 1..=32) from `samples`.
///
/// `seed` fixes the random choices of [`ExtractionMethod::KMeans`] and
/// [`ExtractionMethod::Distant`]; without it they draw from OS entropy.
pub fn extract_palette(
    samples: &[Rgb],
    k: usize,
    method: ExtractionMethod,
    seed: Option<u64>,
) -> Vec<Rgb> {
    let k = k.clamp(1, MAX_PALETTE_SIZE);
    if samples.is_empty() {
        return vec![PAD_COLOR; k];
    }

    let mut colors = match method {
        ExtractionMethod::KMeans => kmeans::kmeans(samples, k, &mut rng_for(seed)),
        ExtractionMethod::MedianCut => median_cut::median_cut(samples, k),
        ExtractionMethod::Frequency => frequency::frequency(samples, k),
        ExtractionMethod::Hue => hue::hue_clusters(samples, k),
        ExtractionMethod::Extreme => extreme::extreme(samples, k),
        ExtractionMethod::Pronounced => extreme::pronounced(samples, k),
        ExtractionMethod::Varied => hue::varied(samples, k),
        ExtractionMethod::Distant => farthest::distant(samples, k, &mut rng_for(seed)),
        ExtractionMethod::Contrasting => farthest::contrasting(samples, k),
    };

    colors.truncate(k);
    colors.resize(k, PAD_COLOR);
    colors
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Samples with duplicates removed, first occurrence order kept.
pub(crate) fn distinct(samples: &[Rgb]) -> Vec<Rgb> {
    let mut seen = HashSet::with_capacity(samples.len());
    samples.iter().copied().filter(|c| seen.insert(*c)).collect()
}

/// High-level extraction builder: sample a buffer, then extract.
#[derive(Debug, Clone)]
pub struct PaletteExtractor {
    method: ExtractionMethod,
    size: usize,
    sample_cap: usize,
    seed: Option<u64>,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self::new(ExtractionMethod::default())
    }
}

impl PaletteExtractor {
    pub fn new(method: ExtractionMethod) -> Self {
        Self {
            method,
            size: DEFAULT_PALETTE_SIZE,
            sample_cap: DEFAULT_SAMPLE_CAP,
            seed: None,
        }
    }

    /// Number of colors to extract, clamped to 1..=32 at extraction time.
    #[inline]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn sample_cap(mut self, cap: usize) -> Self {
        self.sample_cap = cap;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sample `buffer` and extract exactly `size` colors.
    pub fn extract(&self, buffer: &PixelBuffer) -> Vec<Rgb> {
        let started = Instant::now();
        let samples = sample_pixels(buffer, self.sample_cap);
        let colors = extract_palette(&samples, self.size, self.method, self.seed);

        tracing::debug!(
            method = self.method.name(),
            samples = samples.len(),
            colors = colors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "palette extraction complete"
        );
        colors
    }
}
