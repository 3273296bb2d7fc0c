//! PNG <-> raster conversion at the service boundary.
//!
//! Any PNG the `png` crate reads is accepted: palette and sub-byte images are
//! expanded and 16-bit channels stripped to 8 bits. Alpha is dropped and grey
//! is replicated into all three channels. Output is always 8-bit RGB.

use std::io::Cursor;

use kcentroid_core::RawRaster;

use crate::error::ImageError;

/// Largest decoded image accepted, in pixels (64 MP)
pub const MAX_DECODE_PIXELS: u64 = 64 * 1024 * 1024;

/// Decode PNG bytes into an RGB raster
pub fn decode_png(bytes: &[u8]) -> Result<RawRaster, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if u64::from(width) * u64::from(height) > MAX_DECODE_PIXELS {
        return Err(ImageError::TooLarge {
            width,
            height,
            max: MAX_DECODE_PIXELS,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::PngDecode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Unsupported(format!(
            "bit depth {:?} after normalization",
            frame.bit_depth
        )));
    }

    let rgb: Vec<u8> = match frame.color_type {
        png::ColorType::Rgb => data.to_vec(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::Unsupported(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    tracing::trace!(
        width,
        height,
        color_type = ?frame.color_type,
        "Decoded PNG"
    );

    RawRaster::from_rgb_bytes(width as usize, height as usize, &rgb)
        .map_err(|e| ImageError::PngDecode(e.to_string()))
}

/// Encode a raster as an 8-bit RGB PNG
pub fn encode_png(raster: &RawRaster) -> Result<Vec<u8>, ImageError> {
    let width = u32::try_from(raster.width())
        .map_err(|_| ImageError::PngEncode(format!("width {} too large", raster.width())))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| ImageError::PngEncode(format!("height {} too large", raster.height())))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&raster.to_rgb_bytes())
            .map_err(|e| ImageError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
