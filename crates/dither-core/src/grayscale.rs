//! Black-and-white reduction pipeline.
//!
//! [`GrayscaleReducer`] turns an RGBA image into luminance, optionally
//! contrast-stretches it, runs one dither strategy over the whole plane and
//! rebuilds an RGBA buffer with a binary alpha mask.

use std::time::Instant;

use crate::dither::{
    ContrastStretch, DitherMethod, DitherSpec, ErrorBuffer, Kernel, NoiseKind, NoiseSource,
    OrderedMatrix, ScanOrder,
};
use crate::output::{binarize_alpha, PixelBuffer, TransformOutput};

/// Gray values above this become white when the output is rebuilt.
const BINARY_CUTOFF: f32 = 127.0;

/// High-level black-and-white reducer.
///
/// Configuration methods consume and return `self`; [`reduce()`](Self::reduce)
/// takes `&self` so one reducer can process many images.
///
/// # Example
///
/// ```
/// use dither_core::{GrayscaleReducer, PixelBuffer, Rgb};
///
/// let reducer = GrayscaleReducer::new().threshold(150);
/// let buffer = PixelBuffer::new(1, 1, vec![200, 200, 200, 255]).unwrap();
///
/// let output = reducer.reduce(buffer);
/// assert_eq!(output.buffer.pixel(0, 0), [255, 255, 255, 255]);
/// assert_eq!(output.histogram.count(Rgb::WHITE), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrayscaleReducer {
    spec: DitherSpec,
}

impl GrayscaleReducer {
    /// Bitmap reducer at threshold 128.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reducer for a fully specified [`DitherSpec`].
    pub fn with_spec(spec: DitherSpec) -> Self {
        Self { spec }
    }

    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.spec.method = method;
        self
    }

    #[inline]
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.spec.threshold = threshold;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.spec.seed = Some(seed);
        self
    }

    pub fn spec(&self) -> &DitherSpec {
        &self.spec
    }

    /// Reduce `buffer` to black and white (or stretched gray).
    pub fn reduce(&self, mut buffer: PixelBuffer) -> TransformOutput {
        let started = Instant::now();
        let width = buffer.width() as usize;
        let height = buffer.height() as usize;
        let threshold = self.spec.threshold as f32;

        let mut gray = buffer.luminance_plane();

        match self.spec.method {
            DitherMethod::Bitmap => {
                for v in gray.iter_mut() {
                    *v = binary(*v > threshold);
                }
            }
            DitherMethod::ErrorDiffusion { kernel, factor } => {
                diffuse(&mut gray, width, height, kernel.kernel(), factor, threshold);
            }
            DitherMethod::Ordered { matrix } => {
                ordered(&mut gray, width, matrix, self.spec.bias());
            }
            DitherMethod::Noise { kind, factor } => {
                noise(&mut gray, width, kind, factor, threshold, self.spec.seed);
            }
            DitherMethod::Stretch { amount } => {
                let stretch = ContrastStretch::measure(&buffer, &gray, amount);
                for v in gray.iter_mut() {
                    *v = stretch.apply(*v);
                }
            }
        }

        let continuous = matches!(self.spec.method, DitherMethod::Stretch { .. });
        for (px, &g) in buffer.as_bytes_mut().chunks_exact_mut(4).zip(&gray) {
            let g = if continuous {
                g.round().clamp(0.0, 255.0) as u8
            } else if g > BINARY_CUTOFF {
                255
            } else {
                0
            };
            px[0] = g;
            px[1] = g;
            px[2] = g;
            px[3] = binarize_alpha(px[3]);
        }

        let output = TransformOutput::new(buffer);

        tracing::debug!(
            width,
            height,
            method = self.spec.method.name(),
            colors = output.histogram.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "grayscale reduction complete"
        );
        output
    }
}

#[inline]
fn binary(on: bool) -> f32 {
    if on {
        255.0
    } else {
        0.0
    }
}

fn diffuse(
    gray: &mut [f32],
    width: usize,
    height: usize,
    kernel: &Kernel,
    factor: f32,
    threshold: f32,
) {
    let mut errors = ErrorBuffer::<1>::new(width, height);

    for (x, y, reversed) in ScanOrder::Serpentine.positions(width, height) {
        let idx = y * width + x;
        let value = gray[idx] + errors.get(x as i64, y as i64)[0];
        let quantized = binary(value > threshold);
        let error = (value - quantized) * factor;

        for (dx, dy, weight) in kernel.offsets(reversed) {
            errors.add(x as i64 + dx as i64, y as i64 + dy as i64, [error * weight]);
        }
        gray[idx] = quantized;
    }
}

fn ordered(gray: &mut [f32], width: usize, matrix: OrderedMatrix, bias: f32) {
    for (idx, v) in gray.iter_mut().enumerate() {
        let (x, y) = (idx % width, idx / width);
        *v = binary(*v + bias > matrix.threshold_at(x, y));
    }
}

fn noise(
    gray: &mut [f32],
    width: usize,
    kind: NoiseKind,
    factor: f32,
    threshold: f32,
    seed: Option<u64>,
) {
    let mut source = NoiseSource::new(kind, seed);
    for (idx, v) in gray.iter_mut().enumerate() {
        let (x, y) = (idx % width, idx / width);
        *v = binary(*v + source.offset(x, y, factor) > threshold);
    }
}
