//! Tile color quantization and dominant-color selection.
//!
//! The clustering step sits behind the [`Quantizer`] trait so the
//! dominant-color logic does not depend on a particular algorithm.
//! [`KmeansQuantizer`] is the default implementation.
//!
//! # Tie-breaking
//!
//! When several palette entries are assigned the same (maximal) number of
//! pixels, the entry with the lowest palette index wins. For tiles that
//! short-circuit clustering (at most `k` distinct colors) palette order is
//! first-occurrence order in the tile, so the tied color that appears first
//! in row-major order is chosen.

mod kmeans;

pub use kmeans::{KmeansQuantizer, MAX_CENTROIDS};

use thiserror::Error;

use crate::color::Rgb8;

/// Failure reported by a [`Quantizer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QuantizeError {
    message: String,
}

impl QuantizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A tile reduced to a small palette.
///
/// `assignment[i]` is the palette index of the i-th input color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantized {
    pub palette: Vec<Rgb8>,
    pub assignment: Vec<usize>,
}

impl Quantized {
    /// Pixel count per palette entry.
    ///
    /// # Errors
    ///
    /// Fails if an assignment references a palette entry that does not exist.
    pub fn counts(&self) -> Result<Vec<usize>, QuantizeError> {
        let mut counts = vec![0usize; self.palette.len()];
        for &idx in &self.assignment {
            let slot = counts.get_mut(idx).ok_or_else(|| {
                QuantizeError::new(format!(
                    "assignment references palette entry {idx} but palette has {} entries",
                    self.palette.len()
                ))
            })?;
            *slot += 1;
        }
        Ok(counts)
    }

    /// The palette color assigned to the most pixels.
    ///
    /// Ties resolve to the lowest palette index.
    pub fn dominant(&self) -> Result<Rgb8, QuantizeError> {
        let counts = self.counts()?;
        let mut best: Option<(usize, usize)> = None;
        for (idx, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((idx, count)),
            }
        }
        best.map(|(idx, _)| self.palette[idx])
            .ok_or_else(|| QuantizeError::new("no pixels were assigned to any palette entry"))
    }
}

/// Reduces a set of colors to at most `k` representatives.
///
/// Implementations must assign every input color to exactly one palette
/// entry, and must succeed when the input has fewer distinct colors than
/// `k`. Callers guarantee `colors` is non-empty and `k >= 1`.
pub trait Quantizer: Send + Sync {
    fn quantize(&self, colors: &[Rgb8], k: usize) -> Result<Quantized, QuantizeError>;
}

impl<Q: Quantizer + ?Sized> Quantizer for &Q {
    fn quantize(&self, colors: &[Rgb8], k: usize) -> Result<Quantized, QuantizeError> {
        (**self).quantize(colors, k)
    }
}

impl<Q: Quantizer + ?Sized> Quantizer for Box<Q> {
    fn quantize(&self, colors: &[Rgb8], k: usize) -> Result<Quantized, QuantizeError> {
        (**self).quantize(colors, k)
    }
}

/// Quantize one tile and return its dominant color.
///
/// Validates the quantizer's output against the tile before counting.
pub fn dominant_color<Q: Quantizer + ?Sized>(
    quantizer: &Q,
    colors: &[Rgb8],
    k: usize,
) -> Result<Rgb8, QuantizeError> {
    let quantized = quantizer.quantize(colors, k)?;
    if quantized.assignment.len() != colors.len() {
        return Err(QuantizeError::new(format!(
            "quantizer assigned {} of {} pixels",
            quantized.assignment.len(),
            colors.len()
        )));
    }
    if quantized.palette.is_empty() {
        return Err(QuantizeError::new("quantizer returned an empty palette"));
    }
    quantized.dominant()
}

/// Exact palette when `colors` holds at most `k` distinct values.
///
/// Returns `None` as soon as a `k + 1`-th distinct color is seen. Palette
/// order is first-occurrence order.
pub(crate) fn distinct_palette(colors: &[Rgb8], k: usize) -> Option<Quantized> {
    let mut palette: Vec<Rgb8> = Vec::with_capacity(k.min(colors.len()));
    let mut assignment = Vec::with_capacity(colors.len());
    for &color in colors {
        // k <= 256
        let idx = match palette.iter().position(|&p| p == color) {
            Some(idx) => idx,
            None => {
                if palette.len() == k {
                    return None;
                }
                palette.push(color);
                palette.len() - 1
            }
        };
        assignment.push(idx);
    }
    Some(Quantized {
        palette,
        assignment,
    })
}
