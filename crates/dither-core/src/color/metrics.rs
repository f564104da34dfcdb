//! Scalar color metrics: luminance, Redmean distance and contrast ratio.

use super::rgb::Rgb;

/// Rec. 601 luma on the 0..=255 scale.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// [`luminance`] of an 8-bit color.
#[inline]
pub fn luminance_of(color: Rgb) -> f32 {
    luminance(color.r as f32, color.g as f32, color.b as f32)
}

/// Squared Redmean distance between two colors given as float channels.
///
/// The red weight grows with the mean red intensity and the blue weight
/// with its complement. Channels may lie outside 0..=255 (dither bias and
/// accumulated error); only relative order matters to callers.
#[inline]
pub fn redmean_f32(c1: [f32; 3], c2: [f32; 3]) -> f32 {
    let r_mean = (c1[0] + c2[0]) / 2.0;
    let dr = c1[0] - c2[0];
    let dg = c1[1] - c2[1];
    let db = c1[2] - c2[2];
    (2.0 + r_mean / 256.0) * dr * dr + 4.0 * dg * dg + (2.0 + (255.0 - r_mean) / 256.0) * db * db
}

/// Squared Redmean distance between two 8-bit colors.
///
/// ```
/// use dither_core::{redmean, Rgb};
///
/// let d = redmean(Rgb::BLACK, Rgb::new(0, 10, 0));
/// assert_eq!(d, 400.0);
/// ```
#[inline]
pub fn redmean(c1: Rgb, c2: Rgb) -> f32 {
    redmean_f32(c1.to_f32(), c2.to_f32())
}

/// WCAG-style contrast ratio between two luminances normalized to 0..=1.
///
/// Ranges from 1.0 (identical) to 21.0 (black against white).
#[inline]
pub fn contrast_ratio(l1: f32, l2: f32) -> f32 {
    let hi = l1.max(l2);
    let lo = l1.min(l2);
    (hi + 0.05) / (lo + 0.05)
}
