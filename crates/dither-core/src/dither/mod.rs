//! Dither kernel library.
//!
//! Every strategy the engine supports, resolved once per invocation into a
//! [`DitherMethod`] and dispatched by the grayscale reducer and the color
//! quantizer. No strategy is looked up per pixel.
//!
//! # Strategies
//!
//! - **Bitmap**: plain threshold, no dither
//! - **Error diffusion**: Floyd-Steinberg, Atkinson (75% propagation),
//!   Jarvis-Judice-Ninke, Stucki, serpentine scan
//! - **Ordered**: Bayer 2×2 / 4×4 / 8×8 and clustered-dot 4×4 matrices
//! - **Noise**: uniform random or interleaved-gradient blue noise
//! - **Stretch**: global contrast remap, output stays continuous
//!
//! # Example
//!
//! ```
//! use dither_core::{DiffusionKernel, DitherMethod, DitherSpec};
//!
//! let spec = DitherSpec::new(DitherMethod::from_name("Floyd Steinberg", 0.8, 0.0))
//!     .threshold(140);
//! assert_eq!(
//!     spec.method,
//!     DitherMethod::ErrorDiffusion { kernel: DiffusionKernel::FloydSteinberg, factor: 0.8 }
//! );
//! ```

mod error_buffer;
mod kernel;
mod noise;
mod ordered;
mod scan;
mod stretch;

pub use error_buffer::ErrorBuffer;
pub use kernel::*;
pub use noise::{interleaved_gradient_noise, NoiseKind, NoiseSource, NOISE_AMPLITUDE};
pub use ordered::OrderedMatrix;
pub use scan::ScanOrder;
pub use stretch::ContrastStretch;

/// Default threshold, the midpoint of the 0..=255 scale.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Default intensity multiplier for diffusion and noise.
pub const DEFAULT_FACTOR: f32 = 1.0;

/// Error diffusion kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffusionKernel {
    #[default]
    FloydSteinberg,
    /// 75% propagation, lighter output.
    Atkinson,
    JarvisJudiceNinke,
    Stucki,
}

impl DiffusionKernel {
    /// Weight table for this kernel.
    pub fn kernel(self) -> &'static Kernel {
        match self {
            DiffusionKernel::FloydSteinberg => &FLOYD_STEINBERG,
            DiffusionKernel::Atkinson => &ATKINSON,
            DiffusionKernel::JarvisJudiceNinke => &JARVIS_JUDICE_NINKE,
            DiffusionKernel::Stucki => &STUCKI,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiffusionKernel::FloydSteinberg => "floyd-steinberg",
            DiffusionKernel::Atkinson => "atkinson",
            DiffusionKernel::JarvisJudiceNinke => "jarvis",
            DiffusionKernel::Stucki => "stucki",
        }
    }
}

/// Dither strategy, resolved once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DitherMethod {
    /// Plain threshold (grayscale) or nearest color (quantizer).
    #[default]
    Bitmap,
    ErrorDiffusion {
        kernel: DiffusionKernel,
        /// Multiplier on the injected error, typically 0.1..=2.0.
        factor: f32,
    },
    Ordered {
        matrix: OrderedMatrix,
    },
    Noise {
        kind: NoiseKind,
        factor: f32,
    },
    /// Contrast stretch by `amount` percent.
    Stretch {
        amount: f32,
    },
}

impl DitherMethod {
    /// Resolve a user-facing strategy name.
    ///
    /// Matching ignores case and any non-alphanumeric separators, so
    /// `"Floyd-Steinberg"`, `"floyd_steinberg"` and `"floydsteinberg"` are
    /// the same. Unknown names fall back to [`DitherMethod::Bitmap`].
    pub fn from_name(name: &str, factor: f32, stretch: f32) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let diffusion = |kernel| DitherMethod::ErrorDiffusion { kernel, factor };
        let ordered = |matrix| DitherMethod::Ordered { matrix };

        match key.as_str() {
            "" | "none" | "bitmap" | "threshold" => DitherMethod::Bitmap,
            "floydsteinberg" | "floyd" | "fs" => diffusion(DiffusionKernel::FloydSteinberg),
            "atkinson" => diffusion(DiffusionKernel::Atkinson),
            "jarvis" | "jjn" | "jarvisjudiceninke" => diffusion(DiffusionKernel::JarvisJudiceNinke),
            "stucki" => diffusion(DiffusionKernel::Stucki),
            "bayer2" | "bayer2x2" => ordered(OrderedMatrix::Bayer2),
            "bayer" | "bayer4" | "bayer4x4" | "ordered" => ordered(OrderedMatrix::Bayer4),
            "bayer8" | "bayer8x8" => ordered(OrderedMatrix::Bayer8),
            "clustered" | "clustered4" | "clustered4x4" | "clustereddot" | "halftone" => {
                ordered(OrderedMatrix::Clustered4)
            }
            "random" | "noise" | "whitenoise" => DitherMethod::Noise {
                kind: NoiseKind::Random,
                factor,
            },
            "bluenoise" | "blue" | "ign" => DitherMethod::Noise {
                kind: NoiseKind::BlueNoise,
                factor,
            },
            "stretch" | "contrast" | "contraststretch" => DitherMethod::Stretch { amount: stretch },
            _ => {
                tracing::warn!(method = name, "unknown dither method, using bitmap");
                DitherMethod::Bitmap
            }
        }
    }

    /// Canonical name, accepted by [`DitherMethod::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            DitherMethod::Bitmap => "bitmap",
            DitherMethod::ErrorDiffusion { kernel, .. } => kernel.name(),
            DitherMethod::Ordered { matrix } => matrix.name(),
            DitherMethod::Noise {
                kind: NoiseKind::Random,
                ..
            } => "random",
            DitherMethod::Noise {
                kind: NoiseKind::BlueNoise,
                ..
            } => "blue-noise",
            DitherMethod::Stretch { .. } => "stretch",
        }
    }

    /// Scan order the strategy needs: serpentine for diffusion, raster for
    /// everything else.
    pub fn scan_order(&self) -> ScanOrder {
        match self {
            DitherMethod::ErrorDiffusion { .. } => ScanOrder::Serpentine,
            _ => ScanOrder::Raster,
        }
    }
}

/// Dither configuration for one transform.
///
/// # Defaults
///
/// - method: [`DitherMethod::Bitmap`]
/// - threshold: 128
/// - seed: none (random noise is not reproducible)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherSpec {
    pub method: DitherMethod,
    /// Cutoff for threshold-based strategies, 0..=255.
    pub threshold: u8,
    /// Fixes the random source for [`NoiseKind::Random`].
    pub seed: Option<u64>,
}

impl Default for DitherSpec {
    fn default() -> Self {
        Self {
            method: DitherMethod::Bitmap,
            threshold: DEFAULT_THRESHOLD,
            seed: None,
        }
    }
}

impl DitherSpec {
    #[inline]
    pub fn new(method: DitherMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Threshold-derived bias for ordered dithering, `128 − threshold`.
    #[inline]
    pub fn bias(&self) -> f32 {
        DEFAULT_THRESHOLD as f32 - self.threshold as f32
    }
}
