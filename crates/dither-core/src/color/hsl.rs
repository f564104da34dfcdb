//! HSL (hue, saturation, lightness)
//!
//! Used by the hue-driven palette extraction strategies. Saturation and
//! lightness are percentages so scoring formulas read in the same units
//! designers use.

use super::rgb::Rgb;

/// A color in HSL.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    /// Hue in degrees, 0.0..360.0
    pub h: f32,
    /// Saturation in percent, 0.0..=100.0
    pub s: f32,
    /// Lightness in percent, 0.0..=100.0
    pub l: f32,
}

impl Hsl {
    /// Index of the ten-degree hue bucket (0..36) this color falls into.
    #[inline]
    pub fn hue_bucket(self) -> usize {
        ((self.h / 10.0) as usize).min(35)
    }
}

/// Convert an 8-bit sRGB color to HSL.
///
/// Achromatic colors (max == min) report hue 0 and saturation 0.
///
/// ```
/// use dither_core::{rgb_to_hsl, Rgb};
///
/// let hsl = rgb_to_hsl(Rgb::new(0, 0, 255));
/// assert_eq!(hsl.h, 240.0);
/// assert_eq!(hsl.s, 100.0);
/// assert_eq!(hsl.l, 50.0);
/// ```
pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0) % 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

impl From<Rgb> for Hsl {
    fn from(color: Rgb) -> Self {
        rgb_to_hsl(color)
    }
}
