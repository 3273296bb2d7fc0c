//! Color types
//!
//! The pipeline works on raw RGB channel triples only. Normalized floats
//! (0.0..=1.0) are the boundary representation; [`Rgb8`] is the 8-bit form
//! tiles are quantized in.
//!
//! # Example
//!
//! ```
//! use kcentroid_core::Rgb8;
//!
//! let raw = Rgb8::from_normalized([0.5, 0.25, 1.0]);
//! assert_eq!(raw, Rgb8::new(127, 63, 255));
//!
//! let back = raw.to_normalized();
//! assert_eq!(back[2], 1.0);
//! ```

mod rgb8;

pub use rgb8::Rgb8;
