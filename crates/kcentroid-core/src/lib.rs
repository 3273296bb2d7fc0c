//! kcentroid-core: k-centroid downscaling for pixel-art reduction
//!
//! An image is reduced to a target resolution by cutting it into a regular
//! grid of tiles and, for each tile, choosing the single most representative
//! color instead of averaging. Flat regions and hard edges survive where
//! bilinear or box filtering would blur them.
//!
//! # Quick Start
//!
//! The [`KCentroid`] builder is the primary entry point:
//!
//! ```
//! use kcentroid_core::{DownscaleParams, KCentroid, NormalizedImage};
//!
//! let params = DownscaleParams::validate(4, 4, 2, 1024).unwrap();
//! let downscaler = KCentroid::new(params);
//!
//! let image = NormalizedImage::filled(16, 16, [0.0, 1.0, 0.0]).unwrap();
//! let batch = downscaler.downscale_batch(&[image]).unwrap();
//!
//! assert_eq!(batch[0].shape(), (4, 4, 3));
//! ```
//!
//! # Algorithm
//!
//! For a source of `W x H` pixels and a target of `w x h`:
//!
//! ```text
//! factor_x = W / w            (integer division)
//! factor_y = H / h
//!
//! for each output pixel (x, y):
//!     tile    = source[x*factor_x .. (x+1)*factor_x, y*factor_y .. (y+1)*factor_y]
//!     palette = quantize(tile, k)          (at most k colors, one label per pixel)
//!     out[y][x] = palette entry with the most pixels
//! ```
//!
//! Pixels beyond `factor_x * w` columns or `factor_y * h` rows are never
//! read. A target larger than the source on either axis is rejected rather
//! than producing empty tiles.
//!
//! Quantization runs on 8-bit values: normalized input is scaled by 255,
//! clamped and truncated; output is divided by 255.
//!
//! # Clustering
//!
//! Quantization goes through the [`Quantizer`] trait. [`KmeansQuantizer`]
//! wraps `kmeans_colors` with a fixed seed, so results are reproducible.
//! Tiles with at most `k` distinct colors are not clustered at all: their
//! exact colors form the palette, which makes monochrome tiles come out
//! unchanged.

pub mod api;
pub mod color;
pub mod quantize;
pub mod raster;
pub mod tile;

#[cfg(test)]
mod domain_tests;

pub use api::{DownscaleError, DownscaleParams, KCentroid, DEFAULT_CENTROIDS, DEFAULT_MAX_RESOLUTION};
pub use color::Rgb8;
pub use quantize::{KmeansQuantizer, QuantizeError, Quantized, Quantizer, MAX_CENTROIDS};
pub use raster::{NormalizedImage, RawRaster};
pub use tile::{TileGrid, TileRect};
