//! Threshold matrices for ordered dithering.
//!
//! Matrices are tiled over the image with modulo indexing. A matrix of side
//! `n` holds each rank `0..n²` exactly once; the per-cell threshold is
//! `(rank + 0.5) / n² × 255`.

#[rustfmt::skip]
const BAYER_2: [u8; 4] = [
    0, 2,
    3, 1,
];

#[rustfmt::skip]
const BAYER_4: [u8; 16] = [
     0,  8,  2, 10,
    12,  4, 14,  6,
     3, 11,  1,  9,
    15,  7, 13,  5,
];

#[rustfmt::skip]
const BAYER_8: [u8; 64] = [
     0, 32,  8, 40,  2, 34, 10, 42,
    48, 16, 56, 24, 50, 18, 58, 26,
    12, 44,  4, 36, 14, 46,  6, 38,
    60, 28, 52, 20, 62, 30, 54, 22,
     3, 35, 11, 43,  1, 33,  9, 41,
    51, 19, 59, 27, 49, 17, 57, 25,
    15, 47,  7, 39, 13, 45,  5, 37,
    63, 31, 55, 23, 61, 29, 53, 21,
];

// Grows a dot from the center outward.
#[rustfmt::skip]
const CLUSTERED_4: [u8; 16] = [
    12,  5,  6, 13,
     4,  0,  1,  7,
    11,  3,  2,  8,
    15, 10,  9, 14,
];

/// Ordered dither matrix selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderedMatrix {
    Bayer2,
    #[default]
    Bayer4,
    Bayer8,
    /// Clustered-dot 4×4, halftone look.
    Clustered4,
}

impl OrderedMatrix {
    fn table(self) -> &'static [u8] {
        match self {
            OrderedMatrix::Bayer2 => &BAYER_2,
            OrderedMatrix::Bayer4 => &BAYER_4,
            OrderedMatrix::Bayer8 => &BAYER_8,
            OrderedMatrix::Clustered4 => &CLUSTERED_4,
        }
    }

    /// Side length `n`.
    pub fn size(self) -> usize {
        match self {
            OrderedMatrix::Bayer2 => 2,
            OrderedMatrix::Bayer4 | OrderedMatrix::Clustered4 => 4,
            OrderedMatrix::Bayer8 => 8,
        }
    }

    /// `n²`, the number of distinct ranks.
    pub fn divisor(self) -> f32 {
        (self.size() * self.size()) as f32
    }

    /// Rank at `(x, y)`, tiled.
    #[inline]
    pub fn rank(self, x: usize, y: usize) -> u8 {
        let n = self.size();
        self.table()[(y % n) * n + (x % n)]
    }

    /// Cell threshold on the 0..=255 scale.
    #[inline]
    pub fn threshold_at(self, x: usize, y: usize) -> f32 {
        (self.rank(x, y) as f32 + 0.5) / self.divisor() * 255.0
    }

    /// Zero-centered offset added to each color channel:
    /// `(0.5 − (rank + 0.5)/n²) × 255`.
    #[inline]
    pub fn channel_offset(self, x: usize, y: usize) -> f32 {
        (0.5 - (self.rank(x, y) as f32 + 0.5) / self.divisor()) * 255.0
    }

    pub fn name(self) -> &'static str {
        match self {
            OrderedMatrix::Bayer2 => "bayer2",
            OrderedMatrix::Bayer4 => "bayer4",
            OrderedMatrix::Bayer8 => "bayer8",
            OrderedMatrix::Clustered4 => "clustered4",
        }
    }
}
