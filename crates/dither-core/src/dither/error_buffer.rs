/// Request-scoped accumulated diffusion error.
///
/// One `[f32; N]` cell per pixel, row-major: `N = 1` for luminance and
/// `N = 3` for per-channel color error. Out-of-bounds reads yield zero and
/// out-of-bounds writes are dropped, so kernels can spill over the image
/// edge without bounds checks at the call site.
#[derive(Debug)]
pub struct ErrorBuffer<const N: usize> {
    cells: Vec<[f32; N]>,
    width: usize,
    height: usize,
}

impl<const N: usize> ErrorBuffer<N> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![[0.0; N]; width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Accumulated error at `(x, y)`, zeros outside the image.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> [f32; N] {
        self.index(x, y).map_or([0.0; N], |i| self.cells[i])
    }

    /// Add `error` to `(x, y)`; ignored outside the image.
    #[inline]
    pub fn add(&mut self, x: i64, y: i64, error: [f32; N]) {
        if let Some(i) = self.index(x, y) {
            for (cell, e) in self.cells[i].iter_mut().zip(error) {
                *cell += e;
            }
        }
    }
}
