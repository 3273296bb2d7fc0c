//! Public API for the kcentroid-core crate.
//!
//! This module provides the high-level API: the [`KCentroid`] builder,
//! validated [`DownscaleParams`] and the [`DownscaleError`] error type.

mod builder;
mod error;
mod params;

pub use builder::KCentroid;
pub use error::DownscaleError;
pub use params::{DownscaleParams, DEFAULT_CENTROIDS, DEFAULT_MAX_RESOLUTION};
