//! CIE L*a*b* color space
//!
//! Lab is used by the palette extractor, where the sample set is already
//! downsampled and a proper perceptual space is affordable. Real-time
//! matching in the quantizer uses [`redmean`](super::redmean) instead.

use super::lut::srgb8_to_linear;
use super::rgb::Rgb;

/// sRGB (BT.709 primaries) to XYZ, D65.
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

// D65 reference white
const X_N: f32 = 0.95047;
const Y_N: f32 = 1.0;
const Z_N: f32 = 1.08883;

/// (6/29)^3, below which f(t) switches to its linear segment.
const EPSILON: f32 = 0.008856;

const KAPPA_INV: f32 = 7.787;

/// A color in CIE L*a*b* (D65).
///
/// - `l`: lightness, 0 (black) to 100 (white)
/// - `a`: green (-) to red (+)
/// - `b`: blue (-) to yellow (+)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance (CIE76 without the square root).
    ///
    /// ```
    /// use dither_core::Lab;
    ///
    /// let white = Lab::new(100.0, 0.0, 0.0);
    /// let black = Lab::new(0.0, 0.0, 0.0);
    /// assert_eq!(white.distance_sq(black), 10_000.0);
    /// ```
    #[inline]
    pub fn distance_sq(self, other: Lab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_INV * t + 16.0 / 116.0
    }
}

/// Convert an 8-bit sRGB color to Lab.
pub fn rgb_to_lab(color: Rgb) -> Lab {
    let lin = [
        srgb8_to_linear(color.r),
        srgb8_to_linear(color.g),
        srgb8_to_linear(color.b),
    ];

    let xyz: [f32; 3] = std::array::from_fn(|row| {
        RGB_TO_XYZ[row][0] * lin[0] + RGB_TO_XYZ[row][1] * lin[1] + RGB_TO_XYZ[row][2] * lin[2]
    });

    let fx = lab_f(xyz[0] / X_N);
    let fy = lab_f(xyz[1] / Y_N);
    let fz = lab_f(xyz[2] / Z_N);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

impl From<Rgb> for Lab {
    fn from(color: Rgb) -> Self {
        rgb_to_lab(color)
    }
}
