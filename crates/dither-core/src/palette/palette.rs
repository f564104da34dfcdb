//! Palette with per-entry luminance thresholds and Redmean matching.

use super::error::PaletteError;
use crate::color::{redmean_f32, Rgb};

/// Maximum number of entries a palette may hold.
pub const MAX_PALETTE_SIZE: usize = 32;

/// One palette color plus its luminance admission threshold.
///
/// `threshold` is the maximum normalized luminance (0.0..=1.0) a source
/// pixel may have and still render as this entry. Pixels brighter than the
/// threshold of the entry they match become fully transparent, which lets a
/// palette color cover only the darker band of the pixels it would
/// otherwise claim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub color: Rgb,
    pub threshold: f32,
}

impl PaletteEntry {
    /// Create an entry; the threshold is clamped to 0.0..=1.0 and a
    /// non-finite threshold admits everything.
    pub fn new(color: Rgb, threshold: f32) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self { color, threshold }
    }

    /// An entry that admits every source pixel.
    pub fn opaque(color: Rgb) -> Self {
        Self::new(color, 1.0)
    }

    /// Whether a source pixel with this normalized luminance may render as
    /// this entry.
    #[inline]
    pub fn admits(&self, normalized_luminance: f32) -> bool {
        // Full threshold admits white even when float luma rounds above 1.0.
        self.threshold >= 1.0 || normalized_luminance <= self.threshold
    }
}

impl From<Rgb> for PaletteEntry {
    fn from(color: Rgb) -> Self {
        Self::opaque(color)
    }
}

/// An ordered set of 1 to 32 palette entries.
///
/// Order matters only for ties: when two entries are equally close to a
/// query color, the one registered first wins. Duplicate colors are allowed
/// and simply never win a match after the first occurrence.
///
/// # Example
///
/// ```
/// use dither_core::{Palette, PaletteEntry, Rgb};
///
/// let palette = Palette::new(vec![
///     PaletteEntry::opaque(Rgb::BLACK),
///     PaletteEntry::new(Rgb::WHITE, 0.8),
/// ])
/// .unwrap();
/// assert_eq!(palette.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    // Float channels precomputed once; matching runs per pixel.
    channels: Vec<[f32; 3]>,
}

impl Palette {
    /// Create a palette from entries.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] when `entries` is empty. Entries past
    /// [`MAX_PALETTE_SIZE`] are dropped rather than rejected.
    pub fn new(mut entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if entries.len() > MAX_PALETTE_SIZE {
            tracing::warn!(
                requested = entries.len(),
                max = MAX_PALETTE_SIZE,
                "Palette too large, truncating"
            );
            entries.truncate(MAX_PALETTE_SIZE);
        }

        let channels = entries.iter().map(|e| e.color.to_f32()).collect();
        Ok(Self { entries, channels })
    }

    /// Create a palette of fully admitting entries from plain colors.
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, PaletteError> {
        Self::new(colors.iter().copied().map(PaletteEntry::opaque).collect())
    }

    /// Create a palette from hex color strings.
    ///
    /// ```
    /// use dither_core::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex(&["#000", "#ffffff"]).unwrap();
    /// assert_eq!(palette.color(1), Rgb::WHITE);
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.parse::<Rgb>()
                    .map(PaletteEntry::opaque)
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entry(&self, idx: usize) -> &PaletteEntry {
        &self.entries[idx]
    }

    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.entries[idx].color
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Colors in registration order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    /// Float channels of entry `idx` (0..=255 scale).
    #[inline]
    pub fn channels(&self, idx: usize) -> [f32; 3] {
        self.channels[idx]
    }

    /// Index of the entry nearest to `query` by Redmean distance.
    ///
    /// The comparison is strict, so the lowest index wins ties. `query` may
    /// carry dither bias or accumulated error outside 0..=255.
    #[inline]
    pub fn find_nearest(&self, query: [f32; 3]) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, &candidate) in self.channels.iter().enumerate() {
            let dist = redmean_f32(query, candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }
}
