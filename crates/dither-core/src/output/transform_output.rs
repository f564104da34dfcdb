//! Result of a pixel transform.

use super::pixel_buffer::PixelBuffer;
use crate::histogram::PixelHistogram;

/// A transformed buffer plus the histogram of its opaque output colors.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub buffer: PixelBuffer,
    pub histogram: PixelHistogram,
}

impl TransformOutput {
    /// Pair a finished buffer with its histogram, computed here so the two
    /// can never disagree.
    pub fn new(buffer: PixelBuffer) -> Self {
        let histogram = PixelHistogram::from_rgba(buffer.as_bytes());
        Self { buffer, histogram }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }
}
