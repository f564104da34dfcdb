//! Post-quantization color substitution.

use std::collections::HashMap;

use super::error::PaletteError;
use crate::color::Rgb;

/// Exact-match color substitution applied after quantization.
///
/// Keys are packed 24-bit colors of the quantized output. The map is a
/// pure post-process: it never feeds back into matching or error
/// diffusion, so swapping colors cannot change the dither pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorReplacementMap {
    map: HashMap<u32, Rgb>,
}

impl ColorReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `(from, to)` hex pairs.
    ///
    /// ```
    /// use dither_core::{ColorReplacementMap, Rgb};
    ///
    /// let map = ColorReplacementMap::from_hex_pairs([("#000000", "#112233")]).unwrap();
    /// assert_eq!(map.get(Rgb::BLACK), Some(Rgb::new(0x11, 0x22, 0x33)));
    /// ```
    pub fn from_hex_pairs<I, S>(pairs: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for (from, to) in pairs {
            let from = parse(from.as_ref())?;
            let to = parse(to.as_ref())?;
            map.insert(from, to);
        }
        Ok(map)
    }

    /// Register a substitution; a later insert for the same source wins.
    pub fn insert(&mut self, from: Rgb, to: Rgb) {
        self.map.insert(from.key(), to);
    }

    #[inline]
    pub fn get(&self, from: Rgb) -> Option<Rgb> {
        self.map.get(&from.key()).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Substitute colors in an RGBA byte buffer in place.
    ///
    /// Only pixels with alpha > 0 are touched, and each pixel is looked up
    /// exactly once, so `a → b` and `b → c` never chain into `a → c`.
    /// Returns the number of substituted pixels.
    pub fn apply(&self, rgba: &mut [u8]) -> usize {
        if self.map.is_empty() {
            return 0;
        }

        let mut replaced = 0;
        for px in rgba.chunks_exact_mut(4) {
            if px[3] == 0 {
                continue;
            }
            if let Some(to) = self.get(Rgb::new(px[0], px[1], px[2])) {
                px[0] = to.r;
                px[1] = to.g;
                px[2] = to.b;
                replaced += 1;
            }
        }
        replaced
    }
}

fn parse(s: &str) -> Result<Rgb, PaletteError> {
    s.parse().map_err(|source| PaletteError::ParseReplacement {
        entry: s.to_string(),
        source,
    })
}

impl FromIterator<(Rgb, Rgb)> for ColorReplacementMap {
    fn from_iter<T: IntoIterator<Item = (Rgb, Rgb)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (from, to) in iter {
            map.insert(from, to);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_single_pass() {
        let map: ColorReplacementMap = [
            (Rgb::BLACK, Rgb::WHITE),
            (Rgb::WHITE, Rgb::new(255, 0, 0)),
        ]
        .into_iter()
        .collect();

        let mut pixels = vec![0, 0, 0, 255, 255, 255, 255, 255];
        let replaced = map.apply(&mut pixels);

        assert_eq!(replaced, 2);
        // black -> white, but not further to red
        assert_eq!(&pixels[0..4], &[255, 255, 255, 255]);
        assert_eq!(&pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_skips_transparent() {
        let mut map = ColorReplacementMap::new();
        map.insert(Rgb::BLACK, Rgb::WHITE);

        let mut pixels = vec![0, 0, 0, 0];
        assert_eq!(map.apply(&mut pixels), 0);
        assert_eq!(pixels, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_from_hex_pairs_error() {
        let err = ColorReplacementMap::from_hex_pairs([("#000", "nope")]).unwrap_err();
        assert!(matches!(
            err,
            PaletteError::ParseReplacement { ref entry, .. } if entry == "nope"
        ));
    }

    #[test]
    fn test_later_insert_wins() {
        let mut map = ColorReplacementMap::new();
        map.insert(Rgb::BLACK, Rgb::WHITE);
        map.insert(Rgb::BLACK, Rgb::new(1, 2, 3));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(Rgb::BLACK), Some(Rgb::new(1, 2, 3)));
    }
}
