//! Pixel buffers in and out of the engine.
//!
//! [`PixelBuffer`] is the owned RGBA8 image every transform consumes and
//! returns; [`TransformOutput`] pairs a result buffer with its histogram.

mod pixel_buffer;
mod transform_output;

pub use pixel_buffer::{binarize_alpha, PixelBuffer};
pub use transform_output::TransformOutput;
