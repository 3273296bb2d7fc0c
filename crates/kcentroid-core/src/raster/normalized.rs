//! Normalized floating-point image, the boundary representation.

use crate::api::DownscaleError;
use crate::color::Rgb8;

use super::{buffer_len, RawRaster};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 3;

/// An RGB image with `f32` channels in `0.0..=1.0`.
///
/// Layout is row-major, channel-interleaved: shape `(height, width, 3)`.
/// Construction validates the buffer length, so every `NormalizedImage`
/// is well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl NormalizedImage {
    /// Wrap an interleaved buffer of `height * width * 3` floats.
    ///
    /// # Errors
    ///
    /// Returns [`DownscaleError::InvalidInput`] if either dimension is zero
    /// or the buffer length does not match the shape.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, DownscaleError> {
        if width == 0 || height == 0 {
            return Err(DownscaleError::InvalidInput(format!(
                "image has empty shape {height}x{width}"
            )));
        }
        let expected = buffer_len(width, height, CHANNELS)?;
        if data.len() != expected {
            return Err(DownscaleError::InvalidInput(format!(
                "image buffer has {} values, expected {expected} for shape ({height}, {width}, {CHANNELS})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with one color.
    pub fn filled(width: usize, height: usize, color: [f32; 3]) -> Result<Self, DownscaleError> {
        let len = buffer_len(width, height, CHANNELS)?;
        let data = color.iter().copied().cycle().take(len).collect();
        Self::new(width, height, data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Shape as `(height, width, channels)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, CHANNELS)
    }

    /// Interleaved channel values.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume the image, returning the interleaved buffer.
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Channels of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Convert to the 8-bit raw form (scale by 255, clamp, truncate).
    pub fn to_raw(&self) -> RawRaster {
        let pixels = self
            .data
            .chunks_exact(CHANNELS)
            .map(|c| Rgb8::from_normalized([c[0], c[1], c[2]]))
            .collect();
        RawRaster::from_parts(self.width, self.height, pixels)
    }
}

impl From<&RawRaster> for NormalizedImage {
    /// Divide every channel by 255.
    fn from(raw: &RawRaster) -> Self {
        let data = raw
            .pixels()
            .iter()
            .flat_map(|c| c.to_normalized())
            .collect();
        Self {
            width: raw.width(),
            height: raw.height(),
            data,
        }
    }
}
