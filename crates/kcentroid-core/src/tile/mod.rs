//! Tile partitioning.
//!
//! A [`TileGrid`] maps every output pixel to a rectangle of source pixels.
//! Tiles are `factor_x x factor_y`, laid out on a regular grid anchored at
//! the origin. When the source size is not an exact multiple of the target
//! size, the remainder strip at the right and bottom edge belongs to no tile
//! and never influences the output.

use crate::api::DownscaleError;

/// Half-open source rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl TileRect {
    #[inline]
    pub const fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Regular grid of tiles covering a source raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Output width (number of tile columns)
    pub columns: usize,
    /// Output height (number of tile rows)
    pub rows: usize,
    /// Tile width in source pixels
    pub factor_x: usize,
    /// Tile height in source pixels
    pub factor_y: usize,
}

impl TileGrid {
    /// Build the grid for reducing `source` to `target` (both `(width, height)`).
    ///
    /// # Errors
    ///
    /// Returns [`DownscaleError::InvalidParameter`] when a target dimension is
    /// zero or exceeds the source dimension (an upscale request, which would
    /// yield empty tiles).
    pub fn new(source: (usize, usize), target: (usize, usize)) -> Result<Self, DownscaleError> {
        let (src_w, src_h) = source;
        let (dst_w, dst_h) = target;

        if dst_w == 0 {
            return Err(DownscaleError::invalid_parameter("width", "must be at least 1"));
        }
        if dst_h == 0 {
            return Err(DownscaleError::invalid_parameter("height", "must be at least 1"));
        }

        let factor_x = src_w / dst_w;
        let factor_y = src_h / dst_h;

        if factor_x == 0 {
            return Err(DownscaleError::invalid_parameter(
                "width",
                format!("target width {dst_w} exceeds source width {src_w}; upscaling is not supported"),
            ));
        }
        if factor_y == 0 {
            return Err(DownscaleError::invalid_parameter(
                "height",
                format!("target height {dst_h} exceeds source height {src_h}; upscaling is not supported"),
            ));
        }

        Ok(Self {
            columns: dst_w,
            rows: dst_h,
            factor_x,
            factor_y,
        })
    }

    /// Source rectangle for output pixel `(x, y)`.
    #[inline]
    pub fn rect(&self, x: usize, y: usize) -> TileRect {
        TileRect::new(
            x * self.factor_x,
            y * self.factor_y,
            (x + 1) * self.factor_x,
            (y + 1) * self.factor_y,
        )
    }

    /// Number of output pixels (tiles).
    #[inline]
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output coordinate of the `index`-th tile in row-major order.
    #[inline]
    pub fn coord(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Source pixels actually read: `(factor_x * columns, factor_y * rows)`.
    #[cfg(test)]
    fn covered(&self) -> (usize, usize) {
        (self.factor_x * self.columns, self.factor_y * self.rows)
    }

    /// All `(x, y, rect)` triples in row-major output order.
    #[cfg(test)]
    fn tiles(&self) -> impl Iterator<Item = (usize, usize, TileRect)> + '_ {
        (0..self.len()).map(move |i| {
            let (x, y) = self.coord(i);
            (x, y, self.rect(x, y))
        })
    }
}
