//! Test fixtures and constants.

use kcentroid::imaging::encode_png;
use kcentroid_core::{RawRaster, Rgb8};

/// Named colors used across tests
pub mod colors {
    use kcentroid_core::Rgb8;

    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);
    pub const YELLOW: Rgb8 = Rgb8::new(255, 255, 0);
    pub const MAGENTA: Rgb8 = Rgb8::new(255, 0, 255);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
}

/// Build a raster from rows of pixels
pub fn raster_from_rows(rows: &[&[Rgb8]]) -> RawRaster {
    let height = rows.len();
    let width = rows[0].len();
    let pixels = rows.iter().flat_map(|row| row.iter().copied()).collect();
    RawRaster::new(width, height, pixels).unwrap()
}

/// Single-color RGB PNG
pub fn solid_png(width: usize, height: usize, color: Rgb8) -> Vec<u8> {
    let raster = RawRaster::new(width, height, vec![color; width * height]).unwrap();
    encode_png(&raster).unwrap()
}

/// RGB PNG from rows of pixels
pub fn png_from_rows(rows: &[&[Rgb8]]) -> Vec<u8> {
    encode_png(&raster_from_rows(rows)).unwrap()
}

/// 4x4 image whose 2x2 blocks have majorities red, green, blue, yellow
pub fn majority_4x4() -> Vec<u8> {
    use colors::*;
    png_from_rows(&[
        &[RED, RED, GREEN, BLUE],
        &[YELLOW, RED, GREEN, GREEN],
        &[BLUE, BLUE, MAGENTA, YELLOW],
        &[BLUE, RED, YELLOW, YELLOW],
    ])
}

/// 5x5 green image with a magenta last row and column
pub fn green_with_magenta_edge() -> Vec<u8> {
    use colors::*;
    let mut pixels = vec![GREEN; 25];
    for i in 0..5 {
        pixels[4 * 5 + i] = MAGENTA;
        pixels[i * 5 + 4] = MAGENTA;
    }
    encode_png(&RawRaster::new(5, 5, pixels).unwrap()).unwrap()
}

/// Grayscale+alpha PNG with every pixel at `level`
pub fn gray_alpha_png(width: u32, height: u32, level: u8) -> Vec<u8> {
    let data: Vec<u8> = (0..width * height).flat_map(|_| [level, 128]).collect();
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::GrayscaleAlpha);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    buf
}

/// JSON payload for one normalized image filled with `color`
pub fn filled_payload(width: usize, height: usize, color: [f32; 3]) -> serde_json::Value {
    let data: Vec<f32> = (0..width * height).flat_map(|_| color).collect();
    serde_json::json!({ "width": width, "height": height, "data": data })
}
