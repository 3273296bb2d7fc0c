//! kcentroid - k-centroid downscaling service
//!
//! Wraps `kcentroid-core` with PNG I/O, YAML configuration, an HTTP API and
//! a CLI. This library exposes modules for integration testing.

pub mod api;
pub mod cli;
pub mod error;
pub mod imaging;
pub mod models;
pub mod server;
pub mod services;
