//! Validated downscale parameters.

use super::DownscaleError;
use crate::quantize::MAX_CENTROIDS;

/// Default upper bound on target width and height.
pub const DEFAULT_MAX_RESOLUTION: u32 = 1024;

/// Default number of palette colors per tile.
pub const DEFAULT_CENTROIDS: usize = 2;

/// Target size and palette size, checked against their ranges.
///
/// Construct with [`DownscaleParams::validate`]; fields are read-only so a
/// `DownscaleParams` is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownscaleParams {
    width: usize,
    height: usize,
    centroids: usize,
}

impl DownscaleParams {
    /// Check raw (possibly negative) inputs.
    ///
    /// `width` and `height` must lie in `1..=max_resolution`; `centroids`
    /// in `1..=256`.
    ///
    /// # Example
    ///
    /// ```
    /// use kcentroid_core::DownscaleParams;
    ///
    /// let params = DownscaleParams::validate(64, 48, 2, 1024).unwrap();
    /// assert_eq!(params.width(), 64);
    ///
    /// assert!(DownscaleParams::validate(64, -1, 2, 1024).is_err());
    /// ```
    pub fn validate(
        width: i64,
        height: i64,
        centroids: i64,
        max_resolution: u32,
    ) -> Result<Self, DownscaleError> {
        let max = i64::from(max_resolution);
        let width = check_range("width", width, max)?;
        let height = check_range("height", height, max)?;
        let centroids = check_range("centroids", centroids, MAX_CENTROIDS as i64)?;
        Ok(Self {
            width,
            height,
            centroids,
        })
    }

    /// Target width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Target height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette size per tile.
    #[inline]
    pub fn centroids(&self) -> usize {
        self.centroids
    }
}

fn check_range(name: &'static str, value: i64, max: i64) -> Result<usize, DownscaleError> {
    if value < 1 {
        return Err(DownscaleError::invalid_parameter(
            name,
            format!("must be at least 1, got {value}"),
        ));
    }
    if value > max {
        return Err(DownscaleError::invalid_parameter(
            name,
            format!("must be at most {max}, got {value}"),
        ));
    }
    usize::try_from(value)
        .map_err(|_| DownscaleError::invalid_parameter(name, format!("{value} does not fit in usize")))
}
