//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Hex string contains characters outside ASCII
    #[error("hex color contains non-ASCII characters")]
    NonAscii,
    /// A character that is not a hex digit
    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// A palette color string failed to parse
    #[error("invalid palette color at index {index}: {source}")]
    ParseColor {
        /// Position of the offending entry
        index: usize,
        #[source]
        source: ParseColorError,
    },
    /// A replacement map color string failed to parse
    #[error("invalid color replacement '{entry}': {source}")]
    ParseReplacement {
        /// The offending source or target string
        entry: String,
        #[source]
        source: ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            PaletteError::EmptyPalette.to_string(),
            "palette cannot be empty"
        );
        assert_eq!(
            ParseColorError::InvalidLength.to_string(),
            "invalid hex color length (expected 3 or 6 characters)"
        );
        let err = PaletteError::ParseColor {
            index: 2,
            source: ParseColorError::InvalidLength,
        };
        assert!(err.to_string().starts_with("invalid palette color at index 2"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let parse_err = "zz".parse::<u8>().unwrap_err();
        let err = PaletteError::ParseColor {
            index: 0,
            source: ParseColorError::InvalidHex(parse_err),
        };
        assert!(err.source().is_some());
        assert!(PaletteError::EmptyPalette.source().is_none());
    }
}
