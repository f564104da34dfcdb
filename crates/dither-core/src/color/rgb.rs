//! 8-bit RGB color type
//!
//! Every pixel the engine reads or writes is an sRGB triple of bytes. Float
//! math happens in the error buffers and the perceptual color spaces; this
//! type is the exchange format between them, the palette and the output.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure black, the padding color of the palette extractor.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from float channels, rounding and clamping to 0..=255.
    ///
    /// # Example
    /// ```
    /// use dither_core::Rgb;
    /// assert_eq!(Rgb::from_f32([300.0, 127.6, -4.0]), Rgb::new(255, 128, 0));
    /// ```
    #[inline]
    pub fn from_f32(channels: [f32; 3]) -> Self {
        Self {
            r: channels[0].round().clamp(0.0, 255.0) as u8,
            g: channels[1].round().clamp(0.0, 255.0) as u8,
            b: channels[2].round().clamp(0.0, 255.0) as u8,
        }
    }

    /// Channels as floats on the 0..=255 scale.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Packed `0xRRGGBB` key.
    ///
    /// # Example
    /// ```
    /// use dither_core::Rgb;
    /// assert_eq!(Rgb::new(0x12, 0x34, 0x56).key(), 0x123456);
    /// ```
    #[inline]
    pub fn key(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Inverse of [`Rgb::key`]; bits above 24 are ignored.
    #[inline]
    pub fn from_key(key: u32) -> Self {
        Self::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace trimmed.
    ///
    /// ```
    /// use dither_core::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::NonAscii);
        }
        // from_str_radix tolerates a leading sign
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF * 17 == 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("#000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!("#ABC".parse::<Rgb>().unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
        assert_eq!("fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert_eq!("#GGG".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('G')));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#é00".parse::<Rgb>(), Err(ParseColorError::NonAscii)));
    }

    #[test]
    fn test_hex_parsing_rejects_signs() {
        assert_eq!("#+f+f+f".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('+')));
        assert_eq!("+ff".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('+')));
        assert_eq!("#-1-1-1".parse::<Rgb>(), Err(ParseColorError::InvalidDigit('-')));
        assert!("# ff".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let a: Rgb = "  #AbCdEf ".parse().unwrap();
        let b: Rgb = "#abcdef".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hex_formatting_is_lowercase() {
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_hex(), "#ab01ff");
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }

    #[test]
    fn test_key_round_trip_preserves_channels() {
        let color = Rgb::new(1, 2, 3);
        assert_eq!(Rgb::from_key(color.key()), color);
        assert_eq!(Rgb::from_key(0xFF_123456), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_from_f32_rounds_and_clamps() {
        assert_eq!(Rgb::from_f32([0.4, 0.5, 254.6]), Rgb::new(0, 1, 255));
        assert_eq!(Rgb::from_f32([-10.0, 999.0, 128.0]), Rgb::new(0, 255, 128));
    }
}
