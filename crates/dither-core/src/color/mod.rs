//! Color types and conversions
//!
//! - [`Rgb`]: 8-bit sRGB, the pixel and palette exchange format
//! - [`Lab`]: CIE L*a*b* for perceptual clustering in palette extraction
//! - [`Hsl`]: hue/saturation/lightness for hue-driven extraction
//!
//! Plus the scalar metrics shared by every stage: [`luminance`],
//! [`redmean`] and [`contrast_ratio`].

mod hsl;
mod lab;
mod lut;
mod metrics;
mod rgb;

pub use hsl::{rgb_to_hsl, Hsl};
pub use lab::{rgb_to_lab, Lab};
pub use metrics::{contrast_ratio, luminance, luminance_of, redmean, redmean_f32};
pub use rgb::Rgb;
