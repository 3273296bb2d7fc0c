//! k-means quantizer backed by `kmeans_colors`.

use kmeans_colors::{get_kmeans, Kmeans};
use palette::Srgb;

use super::{distinct_palette, QuantizeError, Quantized, Quantizer};
use crate::color::Rgb8;

/// Largest `k` the clustering backend can index (indices are `u8`).
pub const MAX_CENTROIDS: usize = 256;

/// k-means clustering in raw RGB space.
///
/// Tiles with at most `k` distinct colors skip clustering and get an exact
/// palette. Otherwise `runs` k-means++ runs are made with seeds
/// `seed, seed + 1, ...` and the lowest-score run wins, so output is
/// reproducible for a fixed configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KmeansQuantizer {
    max_iter: usize,
    converge: f32,
    runs: u32,
    seed: u64,
}

impl Default for KmeansQuantizer {
    fn default() -> Self {
        Self {
            max_iter: 20,
            converge: 0.0025,
            runs: 1,
            seed: 0,
        }
    }
}

impl KmeansQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iteration cap per run.
    #[inline]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Convergence threshold on centroid movement (normalized RGB units).
    #[inline]
    pub fn converge(mut self, converge: f32) -> Self {
        self.converge = converge;
        self
    }

    /// Number of restarts; the lowest-score run is kept.
    #[inline]
    pub fn runs(mut self, runs: u32) -> Self {
        self.runs = runs.max(1);
        self
    }

    /// Base seed for centroid initialization.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn cluster(&self, colors: &[Rgb8], k: usize) -> Kmeans<Srgb> {
        let samples: Vec<Srgb> = colors
            .iter()
            .map(|c| Srgb::new(c.r, c.g, c.b).into_format())
            .collect();

        let mut best = Kmeans::new();
        for run in 0..self.runs {
            let result = get_kmeans(
                k,
                self.max_iter,
                self.converge,
                false,
                &samples,
                self.seed.wrapping_add(u64::from(run)),
            );
            if result.score < best.score {
                best = result;
            }
        }
        best
    }
}

impl Quantizer for KmeansQuantizer {
    fn quantize(&self, colors: &[Rgb8], k: usize) -> Result<Quantized, QuantizeError> {
        if colors.is_empty() {
            return Err(QuantizeError::new("cannot quantize an empty tile"));
        }
        if k == 0 || k > MAX_CENTROIDS {
            return Err(QuantizeError::new(format!(
                "k must be in 1..={MAX_CENTROIDS}, got {k}"
            )));
        }

        if let Some(exact) = distinct_palette(colors, k) {
            return Ok(exact);
        }

        let result = self.cluster(colors, k);
        if result.indices.len() != colors.len() {
            return Err(QuantizeError::new(format!(
                "k-means labelled {} of {} pixels",
                result.indices.len(),
                colors.len()
            )));
        }

        let palette = result
            .centroids
            .iter()
            .map(|&c| {
                let c: Srgb<u8> = c.into_format();
                Rgb8::new(c.red, c.green, c.blue)
            })
            .collect();
        let assignment = result.indices.iter().map(|&i| usize::from(i)).collect();

        tracing::trace!(pixels = colors.len(), k, score = result.score, "Clustered tile");

        Ok(Quantized {
            palette,
            assignment,
        })
    }
}
