//! Unified error type for the kcentroid-core public API.

use thiserror::Error;

use crate::quantize::QuantizeError;

/// Errors raised while validating parameters or downscaling images.
///
/// There is no partial-success mode: the first error aborts the whole batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownscaleError {
    /// Out-of-range width, height or centroid count, or an upscale request.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed to callers
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },

    /// Malformed image data (wrong buffer length, empty shape, empty tile).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The clustering sub-routine failed for one tile.
    #[error("quantization failed for tile ({x}, {y}): {source}")]
    Quantization {
        /// Output column of the failing tile
        x: usize,
        /// Output row of the failing tile
        y: usize,
        #[source]
        source: QuantizeError,
    },
}

impl DownscaleError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        DownscaleError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for [`DownscaleError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, DownscaleError::InvalidParameter { .. })
    }

    /// True for [`DownscaleError::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DownscaleError::InvalidInput(_))
    }
}
