//! Global contrast remap.

use crate::output::PixelBuffer;

/// Contrast stretch around the image's observed luminance range.
///
/// Not a dither: values are normalized against the min/max luminance,
/// scaled about the midpoint by `1 + amount/100` and mapped back to
/// `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastStretch {
    min: f32,
    max: f32,
    gain: f32,
}

impl ContrastStretch {
    /// Measure the range over opaque pixels of `luminance`, falling back to
    /// every pixel when none are opaque.
    pub fn measure(buffer: &PixelBuffer, luminance: &[f32], amount: f32) -> Self {
        let opaque = buffer.pixels().map(|(_, alpha)| alpha > 0);
        let (mut min, mut max) = range(
            luminance
                .iter()
                .zip(opaque)
                .filter(|&(_, o)| o)
                .map(|(&v, _)| v),
        );
        if min > max {
            (min, max) = range(luminance.iter().copied());
        }
        Self {
            min,
            max,
            gain: 1.0 + amount / 100.0,
        }
    }

    /// Range and gain given directly.
    pub fn with_range(min: f32, max: f32, amount: f32) -> Self {
        Self {
            min,
            max,
            gain: 1.0 + amount / 100.0,
        }
    }

    /// Remap one value on the 0..=255 scale.
    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        let normalized = if span > 0.0 {
            (value - self.min) / span
        } else {
            value / 255.0
        };
        let stretched = (normalized - 0.5) * self.gain + 0.5;
        (stretched * 255.0).clamp(0.0, 255.0)
    }
}

fn range(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
