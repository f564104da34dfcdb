//! Unified error type for the dither-core public API.
//!
//! [`EngineError`] wraps every rejection the engine can produce so callers
//! can propagate with `?` and the message boundary can turn it into a
//! failed response.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Unified error type for the dither-core public API.
///
/// # Example
///
/// ```
/// use dither_core::{EngineError, Palette};
///
/// fn two_tone() -> Result<Palette, EngineError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # assert_eq!(two_tone().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Pixel data does not describe a `width × height` RGBA8 image.
    #[error("invalid dimensions: {width}x{height} does not match {len} bytes of RGBA data")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// Palette validation error (empty, or an entry failed to parse)
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}

impl EngineError {
    /// True for [`PaletteError::EmptyPalette`].
    pub fn is_empty_palette(&self) -> bool {
        matches!(self, EngineError::Palette(PaletteError::EmptyPalette))
    }
}
