//! Domain-critical regression tests for kcentroid-core.
//!
//! Each test documents the class of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::{DownscaleError, DownscaleParams, KCentroid, DEFAULT_MAX_RESOLUTION};
    use crate::color::Rgb8;
    use crate::raster::{NormalizedImage, RawRaster};

    const RED: Rgb8 = Rgb8::new(255, 0, 0);
    const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    const BLUE: Rgb8 = Rgb8::new(0, 0, 255);
    const YELLOW: Rgb8 = Rgb8::new(255, 255, 0);
    const MAGENTA: Rgb8 = Rgb8::new(255, 0, 255);

    fn params(width: i64, height: i64, centroids: i64) -> DownscaleParams {
        DownscaleParams::validate(width, height, centroids, DEFAULT_MAX_RESOLUTION).unwrap()
    }

    /// Deterministic pseudo-random raster (xorshift), no two runs differ.
    fn noise_raster(width: usize, height: usize, seed: u32) -> RawRaster {
        let mut state = seed.max(1);
        let pixels = (0..width * height)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                let [r, g, b, _] = state.to_le_bytes();
                Rgb8::new(r, g, b)
            })
            .collect();
        RawRaster::new(width, height, pixels).unwrap()
    }

    fn raster_from_rows(rows: &[&[Rgb8]]) -> RawRaster {
        let height = rows.len();
        let width = rows[0].len();
        let pixels = rows.iter().flat_map(|row| row.iter().copied()).collect();
        RawRaster::new(width, height, pixels).unwrap()
    }

    // ========================================================================
    // Shape and range
    // ========================================================================

    /// If this breaks, it means: output rasters are not sized
    /// `(height, width, 3)` for some source size, e.g. the remainder strip
    /// leaks into the tile count.
    #[test]
    fn test_shape_invariant_across_batch() {
        let batch: Vec<NormalizedImage> = [(17, 9), (64, 64), (33, 40)]
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| NormalizedImage::from(&noise_raster(w, h, i as u32 + 1)))
            .collect();

        let out = KCentroid::new(params(8, 4, 2)).downscale_batch(&batch).unwrap();

        assert_eq!(out.len(), batch.len());
        for image in &out {
            assert_eq!(image.shape(), (4, 8, 3));
            assert_eq!(image.data().len(), 4 * 8 * 3);
        }
    }

    /// If this breaks, it means: out-of-range input channels are not clamped
    /// before quantization, so output escapes [0, 1].
    #[test]
    fn test_range_invariant_with_out_of_range_input() {
        let data: Vec<f32> = (0..12 * 12 * 3)
            .map(|i| match i % 5 {
                0 => 1.7,
                1 => -0.4,
                2 => f32::NAN,
                3 => 0.5,
                _ => 1.0,
            })
            .collect();
        let image = NormalizedImage::new(12, 12, data).unwrap();

        let out = KCentroid::new(params(3, 3, 2)).downscale(&image).unwrap();

        assert!(out.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    // ========================================================================
    // Determinism
    // ========================================================================

    /// If this breaks, it means: the quantizer is seeded from entropy or
    /// tile evaluation order leaks into the result.
    #[test]
    fn test_repeated_runs_identical() {
        let image = NormalizedImage::from(&noise_raster(40, 30, 99));
        let downscaler = KCentroid::new(params(10, 6, 3));

        let first = downscaler.downscale(&image).unwrap();
        let second = downscaler.downscale(&image).unwrap();
        let third = downscaler.clone().parallel(true).downscale(&image).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    // ========================================================================
    // Tile semantics
    // ========================================================================

    /// If this breaks, it means: a flat tile is being clustered and the
    /// centroid drifts (rounding) instead of returning the exact color.
    #[test]
    fn test_monochrome_tiles_are_exact() {
        let colors = [
            Rgb8::new(13, 200, 77),
            Rgb8::new(1, 2, 3),
            Rgb8::new(254, 128, 0),
            Rgb8::new(90, 90, 90),
        ];
        // 6x6 source, 2x2 target: each 3x3 quadrant is one color
        let pixels = (0..36)
            .map(|i| {
                let (x, y) = (i % 6, i / 6);
                colors[(y / 3) * 2 + x / 3]
            })
            .collect();
        let raster = RawRaster::new(6, 6, pixels).unwrap();
        let image = NormalizedImage::from(&raster);

        let out = KCentroid::new(params(2, 2, 2)).downscale(&image).unwrap();

        // Compare after the same float -> byte conversion the pipeline uses
        let expected_raw = image.to_raw();
        for y in 0..2 {
            for x in 0..2 {
                let expected = expected_raw.pixel(x * 3, y * 3).to_normalized();
                assert_eq!(out.pixel(x, y), expected, "tile ({x}, {y})");
            }
        }
    }

    /// If this breaks, it means: `centroids = 1` no longer yields the single
    /// cluster centroid. With one cluster every pixel is assigned to it, so
    /// the output is the tile mean (rounded to the nearest byte).
    #[test]
    fn test_single_centroid_returns_tile_mean() {
        let a = Rgb8::new(200, 0, 0);
        let b = Rgb8::new(0, 0, 200);
        let raster = raster_from_rows(&[&[a, a], &[a, b]]);

        let out = KCentroid::new(params(1, 1, 1)).downscale_raster(&raster).unwrap();

        let c = out.pixel(0, 0);
        assert!(c.r.abs_diff(150) <= 1, "red channel {}", c.r);
        assert_eq!(c.g, 0);
        assert!(c.b.abs_diff(50) <= 1, "blue channel {}", c.b);
    }

    /// If this breaks, it means: the mode is not taken per 2x2 block, e.g.
    /// tiles are offset or the least frequent color is returned.
    #[test]
    fn test_exact_multiple_majority_per_block() {
        let raster = raster_from_rows(&[
            &[RED, RED, GREEN, BLUE],
            &[YELLOW, RED, GREEN, GREEN],
            &[BLUE, BLUE, MAGENTA, YELLOW],
            &[BLUE, RED, YELLOW, YELLOW],
        ]);

        let out = KCentroid::new(params(2, 2, 2)).downscale_raster(&raster).unwrap();

        assert_eq!(out.pixels(), &[RED, GREEN, BLUE, YELLOW]);
    }

    /// If this breaks, it means: the right/bottom remainder strip of a
    /// non-multiple source is being read (e.g. tiles are stretched to the
    /// full source size).
    #[test]
    fn test_edge_strip_never_influences_output() {
        let mut pixels = vec![GREEN; 25];
        for i in 0..5 {
            pixels[4 * 5 + i] = MAGENTA; // row 4
            pixels[i * 5 + 4] = MAGENTA; // column 4
        }
        let raster = RawRaster::new(5, 5, pixels).unwrap();

        let out = KCentroid::new(params(2, 2, 2)).downscale_raster(&raster).unwrap();

        assert!(out.pixels().iter().all(|&c| c == GREEN));
        assert!(!out.pixels().contains(&MAGENTA));
    }

    /// If this breaks, it means: tie-breaking became dependent on something
    /// other than palette order. For exact palettes the color seen first in
    /// row-major tile order wins a tie.
    #[test]
    fn test_tie_resolves_to_first_seen_color() {
        let raster = raster_from_rows(&[&[BLUE, RED], &[RED, BLUE]]);
        let out = KCentroid::new(params(1, 1, 2)).downscale_raster(&raster).unwrap();
        assert_eq!(out.pixel(0, 0), BLUE);

        let raster = raster_from_rows(&[&[RED, BLUE], &[BLUE, RED]]);
        let out = KCentroid::new(params(1, 1, 2)).downscale_raster(&raster).unwrap();
        assert_eq!(out.pixel(0, 0), RED);
    }

    // ========================================================================
    // Rejections
    // ========================================================================

    /// If this breaks, it means: a target larger than the source produces a
    /// zero factor and degenerate output instead of an error.
    #[test]
    fn test_upscale_rejected() {
        let image = NormalizedImage::filled(4, 4, [0.5, 0.5, 0.5]).unwrap();

        let wide = KCentroid::new(params(5, 4, 2)).downscale(&image).unwrap_err();
        let tall = KCentroid::new(params(4, 5, 2)).downscale(&image).unwrap_err();

        assert!(matches!(wide, DownscaleError::InvalidParameter { name: "width", .. }));
        assert!(matches!(tall, DownscaleError::InvalidParameter { name: "height", .. }));
    }

    /// If this breaks, it means: non-positive parameters slip past
    /// validation.
    #[test]
    fn test_parameter_validation() {
        let cases = [(0, 4, 2, "width"), (4, -1, 2, "height"), (4, 4, 0, "centroids")];
        for (w, h, k, field) in cases {
            match DownscaleParams::validate(w, h, k, DEFAULT_MAX_RESOLUTION) {
                Err(DownscaleError::InvalidParameter { name, .. }) => assert_eq!(name, field),
                other => panic!("expected InvalidParameter for {field}, got {other:?}"),
            }
        }
    }
}
