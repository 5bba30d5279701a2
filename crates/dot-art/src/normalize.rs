//! Upright, size-bounded source images.
//!
//! Provides EXIF orientation correction and aspect-ratio-preserving
//! resampling to a bounding box.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, info};

use crate::orientation::read_orientation;

/// Correct an image for the given EXIF orientation code.
///
/// Codes 5-8 swap width and height. Code 1, the `-1`/`-2` sentinels and any
/// unknown value return an unchanged copy.
pub fn apply_orientation(img: &RgbaImage, code: i32) -> RgbaImage {
    let (w, h) = img.dimensions();
    debug!(w, h, code, "Applying orientation");

    match code {
        2 => imageops::flip_horizontal(img),
        3 => imageops::rotate180(img),
        4 => imageops::flip_vertical(img),
        // transpose: mirror about the main diagonal
        5 => imageops::flip_horizontal(&imageops::rotate90(img)),
        6 => imageops::rotate90(img),
        // transverse: mirror about the anti-diagonal
        7 => imageops::flip_horizontal(&imageops::rotate270(img)),
        8 => imageops::rotate270(img),
        _ => img.clone(),
    }
}

/// Compute output dimensions that fit inside `max_width` x `max_height`.
///
/// A bound of `None` or `Some(0)` means "the source size on that axis".
/// Width is fitted first; height only binds when the width fit would
/// overflow it. Both results are at least 1 for a non-empty source.
pub fn fit_dimensions(
    src_width: u32,
    src_height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    if src_width == 0 || src_height == 0 {
        return (src_width, src_height);
    }

    let max_width = max_width.filter(|&w| w > 0).unwrap_or(src_width);
    let max_height = max_height.filter(|&h| h > 0).unwrap_or(src_height);
    let height_per_width = f64::from(src_height) / f64::from(src_width);

    let mut width = max_width;
    let mut height = scaled(width, height_per_width);

    if height > max_height {
        height = max_height;
        width = scaled(height, 1.0 / height_per_width).min(max_width);
    }

    (width, height)
}

fn scaled(value: u32, ratio: f64) -> u32 {
    ((f64::from(value) * ratio).round() as u32).max(1)
}

/// Resample an image to the dimensions chosen by [`fit_dimensions`].
///
/// Scales up as well as down: the result spans the bounding box on its
/// binding axis.
pub fn resample(img: &RgbaImage, max_width: Option<u32>, max_height: Option<u32>) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();
    let (new_width, new_height) = fit_dimensions(orig_w, orig_h, max_width, max_height);

    if (new_width, new_height) == (orig_w, orig_h) {
        debug!(orig_w, orig_h, "Image already at target size, skipping resample");
        return img.clone();
    }

    debug!(
        orig_w,
        orig_h, new_width, new_height, "Resampling image to bounding box"
    );
    imageops::resize(img, new_width, new_height, FilterType::Lanczos3)
}

/// Shrink an image so it fits the bounding box; smaller images pass through.
pub fn shrink_to_fit(
    img: &RgbaImage,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> RgbaImage {
    let (w, h) = img.dimensions();
    let fits = |size: u32, bound: Option<u32>| bound.is_none_or(|b| b == 0 || size <= b);

    if fits(w, max_width) && fits(h, max_height) {
        return img.clone();
    }
    resample(img, max_width, max_height)
}

/// Decode an encoded image, correct its orientation and cap its size.
///
/// `max_size` bounds both axes (shrink only); `None` keeps the decoded size.
pub fn decode_upright(bytes: &[u8], max_size: Option<u32>) -> crate::Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let orientation = read_orientation(bytes);
    let upright = apply_orientation(&decoded, orientation.code());
    let capped = shrink_to_fit(&upright, max_size, max_size);

    info!(
        width = capped.width(),
        height = capped.height(),
        orientation = orientation.code(),
        "Decoded source image"
    );
    Ok(capped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Create a test image with unique pixel values at corners.
    /// Top-left=10, Top-right=20, Bottom-left=30, Bottom-right=40
    fn create_corner_image(width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]));
        img.put_pixel(0, 0, grey(10));
        img.put_pixel(width - 1, 0, grey(20));
        img.put_pixel(0, height - 1, grey(30));
        img.put_pixel(width - 1, height - 1, grey(40));
        img
    }

    fn grey(v: u8) -> Rgba<u8> {
        Rgba([v, v, v, 255])
    }

    fn value(img: &RgbaImage, x: u32, y: u32) -> u8 {
        img.get_pixel(x, y).0[0]
    }

    #[test]
    fn test_orientation_one_and_unknown_are_copies() {
        let img = create_corner_image(4, 3);
        for code in [1, 0, -1, -2, 9, 42] {
            assert_eq!(apply_orientation(&img, code), img, "code {code}");
        }
    }

    #[test]
    fn test_orientation_180_twice_is_identity() {
        let img = create_corner_image(5, 7);
        let twice = apply_orientation(&apply_orientation(&img, 3), 3);
        assert_eq!(twice, img);
    }

    #[test]
    fn test_orientation_180_corner_values() {
        let img = create_corner_image(4, 4);
        let rotated = apply_orientation(&img, 3);

        assert_eq!(value(&rotated, 0, 0), 40); // was bottom-right
        assert_eq!(value(&rotated, 3, 0), 30); // was bottom-left
        assert_eq!(value(&rotated, 0, 3), 20); // was top-right
        assert_eq!(value(&rotated, 3, 3), 10); // was top-left
    }

    #[test]
    fn test_orientation_swaps_dimensions_for_5_to_8() {
        let img = create_corner_image(6, 3);
        for code in 5..=8 {
            assert_eq!(apply_orientation(&img, code).dimensions(), (3, 6), "code {code}");
        }
        for code in 1..=4 {
            assert_eq!(apply_orientation(&img, code).dimensions(), (6, 3), "code {code}");
        }
    }

    #[test]
    fn test_orientation_mirrors() {
        let img = create_corner_image(6, 3);

        let mirrored = apply_orientation(&img, 2);
        assert_eq!(value(&mirrored, 0, 0), 20);
        assert_eq!(value(&mirrored, 5, 2), 30);

        let flipped = apply_orientation(&img, 4);
        assert_eq!(value(&flipped, 0, 0), 30);
        assert_eq!(value(&flipped, 5, 0), 40);
    }

    #[test]
    fn test_orientation_rotations_corner_values() {
        let img = create_corner_image(6, 3);

        // 6: rotate 90 clockwise, bottom-left lands top-left
        let cw = apply_orientation(&img, 6);
        assert_eq!(value(&cw, 0, 0), 30);
        assert_eq!(value(&cw, 2, 0), 10);
        assert_eq!(value(&cw, 2, 5), 20);

        // 8: rotate 270 clockwise, top-right lands top-left
        let ccw = apply_orientation(&img, 8);
        assert_eq!(value(&ccw, 0, 0), 20);
        assert_eq!(value(&ccw, 0, 5), 10);
    }

    #[test]
    fn test_orientation_transpose_and_transverse() {
        let img = create_corner_image(6, 3);

        // 5: (x, y) -> (y, x)
        let transposed = apply_orientation(&img, 5);
        assert_eq!(value(&transposed, 0, 0), 10);
        assert_eq!(value(&transposed, 0, 5), 20);
        assert_eq!(value(&transposed, 2, 0), 30);
        assert_eq!(value(&transposed, 2, 5), 40);

        // 7: (x, y) -> (h-1-y, w-1-x)
        let transversed = apply_orientation(&img, 7);
        assert_eq!(value(&transversed, 0, 0), 40);
        assert_eq!(value(&transversed, 2, 5), 10);
    }

    #[test]
    fn test_fit_width_first() {
        assert_eq!(fit_dimensions(800, 600, Some(400), Some(400)), (400, 300));
    }

    #[test]
    fn test_fit_height_binds_when_width_fit_overflows() {
        assert_eq!(fit_dimensions(600, 800, Some(400), Some(400)), (300, 400));
    }

    #[test]
    fn test_fit_upscales_to_width_bound() {
        assert_eq!(fit_dimensions(20, 10, Some(32), Some(32)), (32, 16));
    }

    #[test]
    fn test_fit_missing_bounds_mean_source_size() {
        assert_eq!(fit_dimensions(640, 480, None, None), (640, 480));
        assert_eq!(fit_dimensions(640, 480, Some(0), Some(0)), (640, 480));
        assert_eq!(fit_dimensions(640, 480, None, Some(240)), (320, 240));
        assert_eq!(fit_dimensions(640, 480, Some(320), None), (320, 240));
    }

    #[test]
    fn test_fit_never_exceeds_bounds_and_keeps_aspect() {
        let sources = [(1, 1), (3, 1000), (1000, 3), (640, 480), (97, 131), (4032, 3024)];
        let bounds = [(1, 1), (10, 10), (32, 32), (248, 100), (7, 500), (500, 500)];
        for &(sw, sh) in &sources {
            for &(mw, mh) in &bounds {
                let (w, h) = fit_dimensions(sw, sh, Some(mw), Some(mh));
                assert!(w >= 1 && h >= 1);
                assert!(w <= mw && h <= mh, "{sw}x{sh} in {mw}x{mh} -> {w}x{h}");

                // aspect within one pixel on the derived axis, unless clamped to 1
                let expected_h = f64::from(w) * f64::from(sh) / f64::from(sw);
                let expected_w = f64::from(h) * f64::from(sw) / f64::from(sh);
                let ok = (f64::from(h) - expected_h).abs() <= 1.0
                    || (f64::from(w) - expected_w).abs() <= 1.0
                    || w == 1
                    || h == 1;
                assert!(ok, "{sw}x{sh} in {mw}x{mh} -> {w}x{h}");
            }
        }
    }

    #[test]
    fn test_resample_produces_fitted_size() {
        let img = create_corner_image(800, 600);
        assert_eq!(resample(&img, Some(32), Some(32)).dimensions(), (32, 24));
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let img = create_corner_image(8, 4);
        assert_eq!(resample(&img, Some(8), Some(8)), img);
    }

    #[test]
    fn test_shrink_to_fit_leaves_small_images() {
        let img = create_corner_image(100, 50);
        assert_eq!(shrink_to_fit(&img, Some(500), Some(500)), img);
        assert_eq!(shrink_to_fit(&img, None, None), img);
    }

    #[test]
    fn test_shrink_to_fit_caps_large_images() {
        let img = create_corner_image(1000, 250);
        assert_eq!(shrink_to_fit(&img, Some(500), Some(500)).dimensions(), (500, 125));
    }

    #[test]
    fn test_decode_upright_png_has_no_orientation() {
        let img = create_corner_image(6, 3);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_upright(&bytes, None).unwrap();
        assert_eq!(decoded, img);

        let capped = decode_upright(&bytes, Some(3)).unwrap();
        assert_eq!(capped.dimensions(), (3, 2));
    }

    #[test]
    fn test_decode_upright_applies_exif_rotation() {
        // 16x8: dark left half, light right half, on 8px JPEG block boundaries
        let mut img = image::RgbImage::from_pixel(16, 8, image::Rgb([255, 255, 255]));
        for y in 0..8 {
            for x in 0..8 {
                img.put_pixel(x, y, image::Rgb([0, 0, 0]));
            }
        }
        let mut encoded = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Jpeg)
            .unwrap();

        // Splice an APP1/Exif segment with orientation 6 in after SOI
        let exif = crate::orientation::tests::jpeg_with_exif(false, &[(0x0112, 6)], false);
        let app1 = &exif[2..exif.len() - 2];
        let mut bytes = encoded[..2].to_vec();
        bytes.extend_from_slice(app1);
        bytes.extend_from_slice(&encoded[2..]);

        let decoded = decode_upright(&bytes, None).unwrap();
        assert_eq!(decoded.dimensions(), (8, 16));
        // rotated 90 clockwise: the dark left half is now the top half
        assert!(decoded.get_pixel(4, 3)[0] < 64);
        assert!(decoded.get_pixel(4, 12)[0] > 192);
    }

    #[test]
    fn test_decode_upright_rejects_garbage() {
        assert!(matches!(
            decode_upright(b"definitely not an image", None),
            Err(crate::DotArtError::Decode(_))
        ));
    }
}
