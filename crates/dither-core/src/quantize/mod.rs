//! Palette quantization with optional dithering.
//!
//! [`ColorQuantizer`] maps every pixel to its nearest palette entry by
//! Redmean distance after perturbing the query color with the active dither
//! strategy, then applies color replacements to the finished image.
//!
//! Diffusion error is always computed against the matched palette color
//! before any replacement, so swapping colors afterwards changes only the
//! final values and never the spatial pattern.

use std::time::Instant;

use crate::color::luminance;
use crate::dither::{
    ContrastStretch, DitherMethod, DitherSpec, ErrorBuffer, Kernel, NoiseSource, OrderedMatrix,
};
use crate::output::{binarize_alpha, PixelBuffer, TransformOutput};
use crate::palette::{ColorReplacementMap, Palette};

/// Per-invocation query perturbation, resolved from the [`DitherMethod`].
enum Perturbation {
    None,
    Diffusion {
        kernel: &'static Kernel,
        factor: f32,
        errors: ErrorBuffer<3>,
    },
    Ordered {
        matrix: OrderedMatrix,
        bias: f32,
    },
    Noise {
        source: NoiseSource,
        factor: f32,
    },
    Stretch(ContrastStretch),
}

impl Perturbation {
    fn new(spec: &DitherSpec, buffer: &PixelBuffer) -> Self {
        match spec.method {
            DitherMethod::Bitmap => Perturbation::None,
            DitherMethod::ErrorDiffusion { kernel, factor } => Perturbation::Diffusion {
                kernel: kernel.kernel(),
                factor,
                errors: ErrorBuffer::new(buffer.width() as usize, buffer.height() as usize),
            },
            DitherMethod::Ordered { matrix } => Perturbation::Ordered {
                matrix,
                bias: spec.bias(),
            },
            DitherMethod::Noise { kind, factor } => Perturbation::Noise {
                source: NoiseSource::new(kind, spec.seed),
                factor,
            },
            DitherMethod::Stretch { amount } => {
                let plane = buffer.luminance_plane();
                Perturbation::Stretch(ContrastStretch::measure(buffer, &plane, amount))
            }
        }
    }

    #[inline]
    fn query(&mut self, x: usize, y: usize, original: [f32; 3]) -> [f32; 3] {
        let shift = |offset: f32| original.map(|c| c + offset);
        match self {
            Perturbation::None => original,
            Perturbation::Diffusion { errors, .. } => {
                let e = errors.get(x as i64, y as i64);
                [original[0] + e[0], original[1] + e[1], original[2] + e[2]]
            }
            Perturbation::Ordered { matrix, bias } => shift(*bias + matrix.channel_offset(x, y)),
            Perturbation::Noise { source, factor } => shift(source.offset(x, y, *factor)),
            Perturbation::Stretch(stretch) => original.map(|c| stretch.apply(c)),
        }
    }

    #[inline]
    fn diffuse(&mut self, x: usize, y: usize, reversed: bool, query: [f32; 3], matched: [f32; 3]) {
        if let Perturbation::Diffusion {
            kernel,
            factor,
            errors,
        } = self
        {
            let error = [
                (query[0] - matched[0]) * *factor,
                (query[1] - matched[1]) * *factor,
                (query[2] - matched[2]) * *factor,
            ];
            for (dx, dy, weight) in kernel.offsets(reversed) {
                errors.add(
                    x as i64 + dx as i64,
                    y as i64 + dy as i64,
                    error.map(|e| e * weight),
                );
            }
        }
    }
}

/// High-level palette quantizer.
///
/// Constructor requires a [`Palette`], so an empty palette is rejected
/// before any pixel is touched. The quantizer is reusable across images.
///
/// # Example
///
/// ```
/// use dither_core::{ColorQuantizer, Palette, PixelBuffer, Rgb};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let quantizer = ColorQuantizer::new(palette);
///
/// let buffer = PixelBuffer::new(1, 1, vec![30, 30, 30, 255]).unwrap();
/// let output = quantizer.quantize(buffer);
/// assert_eq!(output.buffer.pixel(0, 0), [0, 0, 0, 255]);
/// assert_eq!(output.histogram.count(Rgb::BLACK), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    palette: Palette,
    spec: DitherSpec,
    replacements: ColorReplacementMap,
}

impl ColorQuantizer {
    /// Nearest-color quantizer without dithering or replacements.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            spec: DitherSpec::default(),
            replacements: ColorReplacementMap::new(),
        }
    }

    #[inline]
    pub fn dither(mut self, spec: DitherSpec) -> Self {
        self.spec = spec;
        self
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

    /// Substitutions applied to the finished image.
    #[inline]
    pub fn replacements(mut self, replacements: ColorReplacementMap) -> Self {
        self.replacements = replacements;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Quantize `buffer` to the palette.
    pub fn quantize(&self, mut buffer: PixelBuffer) -> TransformOutput {
        let started = Instant::now();
        let width = buffer.width() as usize;
        let height = buffer.height() as usize;
        let order = self.spec.method.scan_order();
        let mut perturbation = Perturbation::new(&self.spec, &buffer);
        let mut transparent = 0usize;

        let data = buffer.as_bytes_mut();
        for (x, y, reversed) in order.positions(width, height) {
            let i = (y * width + x) * 4;
            let original = [data[i] as f32, data[i + 1] as f32, data[i + 2] as f32];

            let query = perturbation.query(x, y, original);
            let idx = self.palette.find_nearest(query);
            let entry = self.palette.entry(idx);
            perturbation.diffuse(x, y, reversed, query, self.palette.channels(idx));

            let normalized = luminance(original[0], original[1], original[2]) / 255.0;
            if entry.admits(normalized) {
                data[i] = entry.color.r;
                data[i + 1] = entry.color.g;
                data[i + 2] = entry.color.b;
                data[i + 3] = binarize_alpha(data[i + 3]);
            } else {
                data[i..i + 4].fill(0);
                transparent += 1;
            }
        }

        let replaced = self.replacements.apply(data);
        let output = TransformOutput::new(buffer);

        tracing::debug!(
            width,
            height,
            method = self.spec.method.name(),
            palette = self.palette.len(),
            transparent,
            replaced,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quantization complete"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::dither::{DiffusionKernel, NoiseKind};
    use crate::palette::PaletteEntry;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / (width - 1).max(1)) as u8;
                let g = (y * 255 / (height - 1).max(1)) as u8;
                data.extend_from_slice(&[r, g, 128, 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    fn rgb_palette() -> Palette {
        Palette::from_hex(&["#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff"]).unwrap()
    }

    #[test]
    fn test_every_method_stays_in_palette() {
        let palette = rgb_palette();
        let allowed: Vec<Rgb> = palette.colors().collect();
        let methods = [
            DitherMethod::Bitmap,
            DitherMethod::ErrorDiffusion {
                kernel: DiffusionKernel::JarvisJudiceNinke,
                factor: 1.0,
            },
            DitherMethod::Ordered {
                matrix: OrderedMatrix::Bayer8,
            },
            DitherMethod::Noise {
                kind: NoiseKind::Random,
                factor: 0.7,
            },
            DitherMethod::Stretch { amount: 30.0 },
        ];
        for method in methods {
            let output = ColorQuantizer::new(palette.clone())
                .method(method)
                .quantize(gradient(12, 9));
            for (color, alpha) in output.buffer.pixels() {
                assert_eq!(alpha, 255);
                assert!(allowed.contains(&color), "{color} not in palette ({})", method.name());
            }
        }
    }

    #[test]
    fn test_entry_threshold_makes_bright_pixels_transparent() {
        let palette = Palette::new(vec![PaletteEntry::new(Rgb::WHITE, 0.5)]).unwrap();
        let buffer = PixelBuffer::new(2, 1, vec![100, 100, 100, 255, 200, 200, 200, 255]).unwrap();
        let output = ColorQuantizer::new(palette).quantize(buffer);

        assert_eq!(output.buffer.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(output.buffer.pixel(1, 0), [0, 0, 0, 0]);
        assert_eq!(output.histogram.total(), 1);
    }

    #[test]
    fn test_transparent_input_keeps_zero_alpha() {
        let palette = rgb_palette();
        let buffer = PixelBuffer::new(1, 1, vec![250, 5, 5, 0]).unwrap();
        let output = ColorQuantizer::new(palette).quantize(buffer);
        assert_eq!(output.buffer.pixel(0, 0), [255, 0, 0, 0]);
        assert!(output.histogram.is_empty());
    }

    #[test]
    fn test_replacements_do_not_change_pattern() {
        let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        let method = DitherMethod::ErrorDiffusion {
            kernel: DiffusionKernel::FloydSteinberg,
            factor: 1.0,
        };
        let plain = ColorQuantizer::new(palette.clone())
            .method(method)
            .quantize(gradient(16, 16));
        let swapped = ColorQuantizer::new(palette)
            .method(method)
            .replacements([(Rgb::BLACK, Rgb::new(0x11, 0x22, 0x33))].into_iter().collect())
            .quantize(gradient(16, 16));

        for ((a, _), (b, _)) in plain.buffer.pixels().zip(swapped.buffer.pixels()) {
            if a == Rgb::BLACK {
                assert_eq!(b, Rgb::new(0x11, 0x22, 0x33));
            } else {
                assert_eq!(a, b);
            }
        }
        assert_eq!(
            plain.histogram.count(Rgb::BLACK),
            swapped.histogram.count(Rgb::new(0x11, 0x22, 0x33))
        );
        assert_eq!(swapped.histogram.count(Rgb::BLACK), 0);
    }

    #[test]
    fn test_replacements_never_chain() {
        let palette = Palette::from_hex(&["#000000"]).unwrap();
        let replacements = ColorReplacementMap::from_hex_pairs([
            ("#000000", "#ffffff"),
            ("#ffffff", "#ff0000"),
        ])
        .unwrap();
        let output = ColorQuantizer::new(palette)
            .replacements(replacements)
            .quantize(PixelBuffer::filled(2, 2, [9, 9, 9, 255]).unwrap());
        assert_eq!(output.histogram.count(Rgb::WHITE), 4);
    }

    #[test]
    fn test_black_white_diffusion_mixes() {
        let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
        let output = ColorQuantizer::new(palette)
            .method(DitherMethod::ErrorDiffusion {
                kernel: DiffusionKernel::FloydSteinberg,
                factor: 1.0,
            })
            .quantize(PixelBuffer::filled(16, 16, [128, 128, 128, 255]).unwrap());
        let white = output.histogram.count(Rgb::WHITE);
        let black = output.histogram.count(Rgb::BLACK);
        assert_eq!(white + black, 256);
        assert!(white > 64 && black > 64, "white={white} black={black}");
    }
}
