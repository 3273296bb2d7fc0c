//! KCentroid builder -- the primary entry point for the crate.
//!
//! [`KCentroid`] drives the per-image pipeline: normalized -> raw
//! conversion, tile partitioning, per-tile quantization and dominant-color
//! selection, and conversion back to normalized form.

use rayon::prelude::*;

use super::{DownscaleError, DownscaleParams};
use crate::color::Rgb8;
use crate::quantize::{dominant_color, KmeansQuantizer, Quantizer};
use crate::raster::{NormalizedImage, RawRaster};
use crate::tile::TileGrid;

/// K-centroid downscaler.
///
/// # Design
///
/// - Constructor requires validated [`DownscaleParams`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - Downscale methods take `&self`, so one instance serves many batches
/// - Sequential by default; [`parallel(true)`](Self::parallel) spreads
///   images and tiles over the rayon pool. Output is identical either way.
///
/// # Example
///
/// ```
/// use kcentroid_core::{DownscaleParams, KCentroid, NormalizedImage};
///
/// let params = DownscaleParams::validate(2, 2, 2, 1024).unwrap();
/// let downscaler = KCentroid::new(params);
///
/// let image = NormalizedImage::filled(8, 8, [1.0, 0.0, 0.0]).unwrap();
/// let out = downscaler.downscale_batch(&[image]).unwrap();
///
/// assert_eq!(out[0].shape(), (2, 2, 3));
/// assert_eq!(out[0].pixel(1, 1), [1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct KCentroid<Q = KmeansQuantizer> {
    params: DownscaleParams,
    quantizer: Q,
    parallel: bool,
}

impl KCentroid<KmeansQuantizer> {
    /// Create a downscaler using the default k-means quantizer.
    pub fn new(params: DownscaleParams) -> Self {
        Self {
            params,
            quantizer: KmeansQuantizer::default(),
            parallel: false,
        }
    }
}

impl<Q: Quantizer> KCentroid<Q> {
    /// Replace the clustering backend.
    pub fn quantizer<R: Quantizer>(self, quantizer: R) -> KCentroid<R> {
        KCentroid {
            params: self.params,
            quantizer,
            parallel: self.parallel,
        }
    }

    /// Evaluate images and tiles on the rayon thread pool.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Validated target size and palette size.
    #[inline]
    pub fn params(&self) -> &DownscaleParams {
        &self.params
    }

    /// Downscale every image in `images`.
    ///
    /// The output has the same length and order as the input. The first
    /// failing image fails the whole batch.
    pub fn downscale_batch(
        &self,
        images: &[NormalizedImage],
    ) -> Result<Vec<NormalizedImage>, DownscaleError> {
        let run = |(index, image): (usize, &NormalizedImage)| {
            self.downscale(image).inspect_err(|e| {
                tracing::warn!(index, error = %e, "Downscale failed");
            })
        };

        if self.parallel {
            images.par_iter().enumerate().map(run).collect()
        } else {
            images.iter().enumerate().map(run).collect()
        }
    }

    /// Downscale a single normalized image.
    pub fn downscale(&self, image: &NormalizedImage) -> Result<NormalizedImage, DownscaleError> {
        let raw = image.to_raw();
        let out = self.downscale_raster(&raw)?;
        Ok(NormalizedImage::from(&out))
    }

    /// Downscale an 8-bit raster to `(height, width)`.
    ///
    /// # Errors
    ///
    /// - [`DownscaleError::InvalidParameter`] if the target exceeds the
    ///   source on either axis
    /// - [`DownscaleError::InvalidInput`] if a tile is empty
    /// - [`DownscaleError::Quantization`] if the quantizer fails on a tile
    pub fn downscale_raster(&self, raster: &RawRaster) -> Result<RawRaster, DownscaleError> {
        let grid = TileGrid::new(
            (raster.width(), raster.height()),
            (self.params.width(), self.params.height()),
        )?;

        tracing::debug!(
            source_width = raster.width(),
            source_height = raster.height(),
            width = grid.columns,
            height = grid.rows,
            factor_x = grid.factor_x,
            factor_y = grid.factor_y,
            centroids = self.params.centroids(),
            "Downscaling image"
        );

        let tile = |index: usize| {
            let (x, y) = grid.coord(index);
            self.tile_color(raster, &grid, x, y)
        };

        let pixels: Vec<Rgb8> = if self.parallel {
            (0..grid.len()).into_par_iter().map(tile).collect::<Result<_, _>>()?
        } else {
            (0..grid.len()).map(tile).collect::<Result<_, _>>()?
        };

        RawRaster::new(grid.columns, grid.rows, pixels)
    }

    fn tile_color(
        &self,
        raster: &RawRaster,
        grid: &TileGrid,
        x: usize,
        y: usize,
    ) -> Result<Rgb8, DownscaleError> {
        let colors = raster.tile_colors(grid.rect(x, y));
        if colors.is_empty() {
            return Err(DownscaleError::InvalidInput(format!(
                "tile ({x}, {y}) contains no pixels"
            )));
        }
        dominant_color(&self.quantizer, &colors, self.params.centroids())
            .map_err(|source| DownscaleError::Quantization { x, y, source })
    }
}
