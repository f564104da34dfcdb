//! Request/response contract of the engine.
//!
//! A [`TransformRequest`] owns its pixel data; [`process`] consumes it and
//! hands the output buffer back inside a [`TransformResponse`]. Failures
//! come back as [`TransformResponse::Failed`] so a worker can forward every
//! outcome over one channel.

use std::time::Instant;

use crate::dither::DitherSpec;
use crate::extract::{
    extract_palette, sample_pixels, ExtractionMethod, DEFAULT_PALETTE_SIZE, DEFAULT_SAMPLE_CAP,
};
use crate::grayscale::GrayscaleReducer;
use crate::histogram::PixelHistogram;
use crate::output::PixelBuffer;
use crate::palette::{ColorReplacementMap, Palette, PaletteEntry};
use crate::quantize::ColorQuantizer;

use super::error::EngineError;

/// What a request asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Black-and-white reduction.
    Dither,
    /// Map to a palette.
    Quantize,
    /// Derive a palette from the image.
    ExtractPalette,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Dither => "dither",
            Operation::Quantize => "quantize",
            Operation::ExtractPalette => "extract-palette",
        }
    }
}

/// One unit of work for the engine.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    /// Caller-assigned correlation id, echoed in the response.
    pub job_id: u64,
    pub operation: Operation,
    pub width: u32,
    pub height: u32,
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    pub dither: DitherSpec,
    /// Quantization palette; unused by the other operations.
    pub palette: Vec<PaletteEntry>,
    pub replacements: ColorReplacementMap,
    /// Number of colors to extract.
    pub palette_size: usize,
    pub extraction: ExtractionMethod,
    /// Maximum opaque pixels sampled for extraction.
    pub sample_cap: usize,
}

impl TransformRequest {
    /// Request with default dither, extraction and sampling settings.
    pub fn new(
        job_id: u64,
        operation: Operation,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Self {
        Self {
            job_id,
            operation,
            width,
            height,
            pixels,
            dither: DitherSpec::default(),
            palette: Vec::new(),
            replacements: ColorReplacementMap::new(),
            palette_size: DEFAULT_PALETTE_SIZE,
            extraction: ExtractionMethod::default(),
            sample_cap: DEFAULT_SAMPLE_CAP,
        }
    }

    #[inline]
    pub fn with_dither(mut self, dither: DitherSpec) -> Self {
        self.dither = dither;
        self
    }

    #[inline]
    pub fn with_palette(mut self, palette: Vec<PaletteEntry>) -> Self {
        self.palette = palette;
        self
    }

    #[inline]
    pub fn with_replacements(mut self, replacements: ColorReplacementMap) -> Self {
        self.replacements = replacements;
        self
    }

    #[inline]
    pub fn with_extraction(mut self, method: ExtractionMethod, size: usize) -> Self {
        self.extraction = method;
        self.palette_size = size;
        self
    }

    #[inline]
    pub fn with_sample_cap(mut self, cap: usize) -> Self {
        self.sample_cap = cap;
        self
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResponse {
    /// Result of [`Operation::Dither`] or [`Operation::Quantize`].
    Image {
        job_id: u64,
        buffer: PixelBuffer,
        histogram: PixelHistogram,
    },
    /// Result of [`Operation::ExtractPalette`]: `#rrggbb` strings.
    Palette { job_id: u64, colors: Vec<String> },
    Failed { job_id: u64, message: String },
}

impl TransformResponse {
    pub fn job_id(&self) -> u64 {
        match self {
            TransformResponse::Image { job_id, .. }
            | TransformResponse::Palette { job_id, .. }
            | TransformResponse::Failed { job_id, .. } => *job_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TransformResponse::Failed { .. })
    }
}

/// Run `request` to completion.
///
/// Never panics on bad input: invalid dimensions or an empty palette turn
/// into [`TransformResponse::Failed`] carrying the error message.
///
/// # Example
///
/// ```
/// use dither_core::{process, Operation, TransformRequest, TransformResponse};
///
/// let request = TransformRequest::new(7, Operation::Dither, 1, 1, vec![200, 200, 200, 255]);
/// match process(request) {
///     TransformResponse::Image { job_id, histogram, .. } => {
///         assert_eq!(job_id, 7);
///         assert_eq!(histogram.count_hex("#ffffff"), 1);
///     }
///     other => panic!("unexpected response: {other:?}"),
/// }
/// ```
pub fn process(request: TransformRequest) -> TransformResponse {
    let job_id = request.job_id;
    let operation = request.operation;
    let started = Instant::now();

    let response = match try_process(request) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                job_id,
                operation = operation.name(),
                error = %err,
                "transform rejected"
            );
            TransformResponse::Failed {
                job_id,
                message: err.to_string(),
            }
        }
    };

    tracing::debug!(
        job_id,
        operation = operation.name(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "transform finished"
    );
    response
}

/// [`process`] with the error kept typed.
pub fn try_process(request: TransformRequest) -> Result<TransformResponse, EngineError> {
    let TransformRequest {
        job_id,
        operation,
        width,
        height,
        pixels,
        dither,
        palette,
        replacements,
        palette_size,
        extraction,
        sample_cap,
    } = request;

    let buffer = PixelBuffer::new(width, height, pixels)?;

    let response = match operation {
        Operation::Dither => {
            let output = GrayscaleReducer::with_spec(dither).reduce(buffer);
            TransformResponse::Image {
                job_id,
                buffer: output.buffer,
                histogram: output.histogram,
            }
        }
        Operation::Quantize => {
            let palette = Palette::new(palette)?;
            let output = ColorQuantizer::new(palette)
                .dither(dither)
                .replacements(replacements)
                .quantize(buffer);
            TransformResponse::Image {
                job_id,
                buffer: output.buffer,
                histogram: output.histogram,
            }
        }
        Operation::ExtractPalette => {
            let samples = sample_pixels(&buffer, sample_cap);
            let colors = extract_palette(&samples, palette_size, extraction, dither.seed);
            TransformResponse::Palette {
                job_id,
                colors: colors.into_iter().map(|c| c.to_hex()).collect(),
            }
        }
    };
    Ok(response)
}
