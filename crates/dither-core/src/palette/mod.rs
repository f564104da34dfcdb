//! Palette types
//!
//! - [`Palette`]: ordered entries with per-entry luminance thresholds and
//!   Redmean nearest-color matching
//! - [`ColorReplacementMap`]: post-quantization color substitution
//! - [`PaletteError`], [`ParseColorError`]: validation and parsing errors

mod error;
mod palette;
mod replacements;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteEntry, MAX_PALETTE_SIZE};
pub use replacements::ColorReplacementMap;
