//! Image representations.
//!
//! - [`NormalizedImage`]: `f32` channels in `0.0..=1.0`, the form images
//!   cross the crate boundary in.
//! - [`RawRaster`]: 8-bit channels, the form tiles are extracted and
//!   quantized from.

mod normalized;
mod raw;

pub use normalized::{NormalizedImage, CHANNELS};
pub use raw::RawRaster;

use crate::api::DownscaleError;

/// `width * height * channels`, rejecting shapes whose size overflows `usize`.
pub(crate) fn buffer_len(
    width: usize,
    height: usize,
    channels: usize,
) -> Result<usize, DownscaleError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            DownscaleError::InvalidInput(format!(
                "shape ({height}, {width}, {channels}) overflows the address space"
            ))
        })
}
