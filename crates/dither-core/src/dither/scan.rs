/// Pixel visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Even rows left to right, odd rows right to left.
    #[default]
    Serpentine,
    /// Every row left to right.
    Raster,
}

impl ScanOrder {
    /// Whether row `y` is traversed right to left.
    #[inline]
    pub fn is_reversed(self, y: usize) -> bool {
        self == ScanOrder::Serpentine && y % 2 == 1
    }

    /// `(x, y, reversed)` for every pixel in visiting order.
    pub fn positions(
        self,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize, bool)> {
        (0..height).flat_map(move |y| {
            let reversed = self.is_reversed(y);
            (0..width).map(move |i| {
                let x = if reversed { width - 1 - i } else { i };
                (x, y, reversed)
            })
        })
    }
}
