//! Output color histogram.

use std::collections::HashMap;

use crate::color::Rgb;

/// Frequency of each output color over opaque pixels.
///
/// Built once per transform from the final (post-substitution) buffer.
/// Consumers use it to offer palette-swap suggestions, so only counts
/// matter; iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelHistogram {
    counts: HashMap<Rgb, u32>,
}

impl PixelHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every pixel with alpha > 0 in an RGBA byte buffer.
    pub fn from_rgba(rgba: &[u8]) -> Self {
        let mut histogram = Self::new();
        for px in rgba.chunks_exact(4) {
            if px[3] > 0 {
                histogram.record(Rgb::new(px[0], px[1], px[2]));
            }
        }
        histogram
    }

    #[inline]
    pub fn record(&mut self, color: Rgb) {
        *self.counts.entry(color).or_insert(0) += 1;
    }

    /// Count for `color`, zero when absent.
    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Count for a hex color string; unparseable strings count as zero.
    ///
    /// ```
    /// use dither_core::{PixelHistogram, Rgb};
    ///
    /// let mut histogram = PixelHistogram::new();
    /// histogram.record(Rgb::WHITE);
    /// assert_eq!(histogram.count_hex("#FFFFFF"), 1);
    /// ```
    pub fn count_hex(&self, hex: &str) -> u32 {
        hex.parse().map(|c| self.count(c)).unwrap_or(0)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of opaque pixels tallied.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rgb, u32)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }

    /// `#rrggbb` → count, the shape handed to the UI layer.
    pub fn to_hex_map(&self) -> HashMap<String, u32> {
        self.counts
            .iter()
            .map(|(c, &n)| (c.to_hex(), n))
            .collect()
    }

    /// Colors by descending count; equal counts ordered by color value.
    pub fn most_common(&self) -> Vec<(Rgb, u32)> {
        let mut entries: Vec<(Rgb, u32)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_counts_opaque_only() {
        let pixels = [
            255, 255, 255, 255, //
            0, 0, 0, 255, //
            255, 255, 255, 255, //
            9, 9, 9, 0,
        ];
        let histogram = PixelHistogram::from_rgba(&pixels);

        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.count(Rgb::WHITE), 2);
        assert_eq!(histogram.count(Rgb::BLACK), 1);
        assert_eq!(histogram.count(Rgb::new(9, 9, 9)), 0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_hex_map() {
        let mut histogram = PixelHistogram::new();
        histogram.record(Rgb::new(0xAB, 0xCD, 0xEF));
        let map = histogram.to_hex_map();
        assert_eq!(map.get("#abcdef"), Some(&1));
        assert_eq!(histogram.count_hex("not a color"), 0);
    }

    #[test]
    fn test_most_common_order() {
        let mut histogram = PixelHistogram::new();
        for _ in 0..3 {
            histogram.record(Rgb::new(5, 5, 5));
        }
        histogram.record(Rgb::new(2, 2, 2));
        histogram.record(Rgb::new(1, 1, 1));

        let ordered = histogram.most_common();
        assert_eq!(
            ordered,
            vec![
                (Rgb::new(5, 5, 5), 3),
                (Rgb::new(1, 1, 1), 1),
                (Rgb::new(2, 2, 2), 1),
            ]
        );
    }
}
