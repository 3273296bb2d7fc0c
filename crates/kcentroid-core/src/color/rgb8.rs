//! 8-bit RGB triple used inside the downscale pipeline.

/// A color with one byte per channel.
///
/// This is the "raw" representation used while tiles are quantized. Values
/// at the crate boundary are normalized floats; see
/// [`Rgb8::from_normalized`] and [`Rgb8::to_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb8 {
    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert normalized channels to bytes.
    ///
    /// Each channel is scaled by 255, clamped to `0..=255` and truncated
    /// toward zero (not rounded). NaN maps to 0.
    ///
    /// # Example
    /// ```
    /// use kcentroid_core::Rgb8;
    /// let c = Rgb8::from_normalized([1.0, 0.5, -0.2]);
    /// assert_eq!(c, Rgb8::new(255, 127, 0));
    /// ```
    #[inline]
    pub fn from_normalized(channels: [f32; 3]) -> Self {
        Self::new(
            normalized_to_byte(channels[0]),
            normalized_to_byte(channels[1]),
            normalized_to_byte(channels[2]),
        )
    }

    /// Convert to normalized channels by dividing by 255.
    #[inline]
    pub fn to_normalized(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[inline]
fn normalized_to_byte(v: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    (v * 255.0).clamp(0.0, 255.0) as u8
}

impl From<[u8; 3]> for Rgb8 {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(color: Rgb8) -> Self {
        color.to_bytes()
    }
}
