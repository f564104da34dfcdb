#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception
)]

//! dither-core: dithering, color quantization and palette extraction
//!
//! A pure, synchronous pixel transform engine over owned RGBA8 buffers.
//! Every transform consumes a [`PixelBuffer`] and returns a new one together
//! with a [`PixelHistogram`] of its opaque output colors.
//!
//! # Quick Start
//!
//! Black-and-white reduction with error diffusion:
//!
//! ```
//! use dither_core::{DiffusionKernel, DitherMethod, GrayscaleReducer, PixelBuffer};
//!
//! let reducer = GrayscaleReducer::new().method(DitherMethod::ErrorDiffusion {
//!     kernel: DiffusionKernel::Atkinson,
//!     factor: 1.0,
//! });
//! let buffer = PixelBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap();
//! let output = reducer.reduce(buffer);
//! assert_eq!(output.width(), 4);
//! ```
//!
//! Quantizing to a palette extracted from the image itself:
//!
//! ```
//! use dither_core::{ColorQuantizer, ExtractionMethod, Palette, PaletteExtractor, PixelBuffer};
//!
//! let buffer = PixelBuffer::new(2, 1, vec![250, 10, 10, 255, 10, 10, 250, 255]).unwrap();
//! let colors = PaletteExtractor::new(ExtractionMethod::MedianCut)
//!     .size(2)
//!     .extract(&buffer);
//! let palette = Palette::from_colors(&colors).unwrap();
//!
//! let output = ColorQuantizer::new(palette).quantize(buffer);
//! assert_eq!(output.histogram.len(), 2);
//! ```
//!
//! # Message boundary
//!
//! [`process`] accepts a [`TransformRequest`] and always answers with a
//! [`TransformResponse`]; rejections such as mismatched dimensions or an
//! empty palette come back as [`TransformResponse::Failed`].
//!
//! # Color matching
//!
//! Nearest-palette matching uses the Redmean distance; Lab is reserved for
//! palette extraction, where the pixel volume is already sampled down.

pub mod api;
pub mod color;
pub mod dither;
pub mod extract;
pub mod grayscale;
pub mod histogram;
pub mod output;
pub mod palette;
pub mod quantize;


pub use api::{process, try_process, EngineError, Operation, TransformRequest, TransformResponse};
pub use color::{
    contrast_ratio, luminance, luminance_of, redmean, redmean_f32, rgb_to_hsl, rgb_to_lab, Hsl,
    Lab, Rgb,
};
pub use dither::{DiffusionKernel, DitherMethod, DitherSpec, NoiseKind, OrderedMatrix, ScanOrder};
pub use extract::{extract_palette, sample_pixels, ExtractionMethod, PaletteExtractor};
pub use grayscale::GrayscaleReducer;
pub use histogram::PixelHistogram;
pub use output::{PixelBuffer, TransformOutput};
pub use palette::{
    ColorReplacementMap, Palette, PaletteEntry, PaletteError, ParseColorError, MAX_PALETTE_SIZE,
};
pub use quantize::ColorQuantizer;
