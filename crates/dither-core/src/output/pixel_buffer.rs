//! Owned RGBA8 pixel buffer.

use crate::api::EngineError;
use crate::color::{luminance, Rgb};

/// An owned `width × height` RGBA8 image, row-major.
///
/// Transforms consume the buffer they are given and return a fresh one,
/// so ownership can move across a thread or message boundary without a
/// copy.
///
/// # Example
///
/// ```
/// use dither_core::PixelBuffer;
///
/// let buffer = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
/// assert_eq!(buffer.pixel(1, 0), [255, 255, 255, 255]);
///
/// // Length must be width * height * 4
/// assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidDimensions`] when either dimension is zero or
    /// `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, EngineError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));

        match expected {
            Some(expected) if width > 0 && height > 0 && expected == data.len() => Ok(Self {
                width,
                height,
                data,
            }),
            _ => Err(EngineError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            }),
        }
    }

    /// A buffer filled with one RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EngineError> {
        let count = (width as usize) * (height as usize);
        Self::new(width, height, rgba.repeat(count))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / 4
    }

    /// Always `false`; zero-sized buffers are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes; the length cannot change through a slice.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Iterate pixels as `(Rgb, alpha)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (Rgb, u8)> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| (Rgb::new(px[0], px[1], px[2]), px[3]))
    }

    /// Per-pixel luminance on the 0..=255 scale, row-major.
    pub fn luminance_plane(&self) -> Vec<f32> {
        self.data
            .chunks_exact(4)
            .map(|px| luminance(px[0] as f32, px[1] as f32, px[2] as f32))
            .collect()
    }

    /// Number of pixels with alpha > 0.
    pub fn opaque_count(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

/// Binary transparency: 0 stays a hole, anything else is fully opaque.
#[inline]
pub fn binarize_alpha(alpha: u8) -> u8 {
    if alpha == 0 {
        0
    } else {
        255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidDimensions {
                width: 2,
                height: 2,
                len: 15
            }
        ));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 3, vec![]).is_err());
        assert!(PixelBuffer::new(3, 0, vec![]).is_err());
    }

    #[test]
    fn test_accessors() {
        let buffer = PixelBuffer::filled(3, 2, [10, 20, 30, 255]).unwrap();
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.as_bytes().len(), 24);
        assert_eq!(buffer.pixel(2, 1), [10, 20, 30, 255]);
        assert_eq!(buffer.opaque_count(), 6);
        assert_eq!(buffer.pixels().next(), Some((Rgb::new(10, 20, 30), 255)));
    }

    #[test]
    fn test_luminance_plane() {
        let buffer = PixelBuffer::new(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 0]).unwrap();
        let plane = buffer.luminance_plane();
        assert!((plane[0] - 255.0).abs() < 1e-3);
        assert_eq!(plane[1], 0.0);
    }

    #[test]
    fn test_binarize_alpha() {
        assert_eq!(binarize_alpha(0), 0);
        assert_eq!(binarize_alpha(1), 255);
        assert_eq!(binarize_alpha(255), 255);
    }
}
