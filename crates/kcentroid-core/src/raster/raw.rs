//! 8-bit raster used while tiles are quantized.

use crate::api::DownscaleError;
use crate::color::Rgb8;
use crate::tile::TileRect;

use super::buffer_len;

/// An 8-bit-per-channel RGB raster, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRaster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb8>,
}

impl RawRaster {
    /// Create a raster from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`DownscaleError::InvalidInput`] for an empty shape or when
    /// `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb8>) -> Result<Self, DownscaleError> {
        if width == 0 || height == 0 {
            return Err(DownscaleError::InvalidInput(format!(
                "raster has empty shape {height}x{width}"
            )));
        }
        let expected = buffer_len(width, height, 1)?;
        if pixels.len() != expected {
            return Err(DownscaleError::InvalidInput(format!(
                "raster has {} pixels, expected {width}x{height}={expected}",
                pixels.len()
            )));
        }
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Create a raster from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DownscaleError::InvalidInput`] unless `bytes` holds exactly
    /// `width * height` RGB triples.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, DownscaleError> {
        if bytes.len() % 3 != 0 {
            return Err(DownscaleError::InvalidInput(format!(
                "RGB buffer length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb8::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb8 {
        self.pixels[y * self.width + x]
    }

    /// Packed `[R, G, B, ...]` bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// Colors inside `rect`, row-major within the tile.
    ///
    /// The rectangle is clipped to the raster bounds. Tiles produced by a
    /// [`TileGrid`](crate::tile::TileGrid) never need clipping.
    pub fn tile_colors(&self, rect: TileRect) -> Vec<Rgb8> {
        let x1 = rect.x1.min(self.width);
        let y1 = rect.y1.min(self.height);
        let x0 = rect.x0.min(x1);
        let y0 = rect.y0.min(y1);

        let mut colors = Vec::with_capacity((x1 - x0) * (y1 - y0));
        for y in y0..y1 {
            let row = y * self.width;
            colors.extend_from_slice(&self.pixels[row + x0..row + x1]);
        }
        colors
    }
}
