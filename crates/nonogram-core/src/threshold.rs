//! Brightness projection and threshold selection.
//!
//! Brightness is the plain average of R, G and B, rounded to the nearest
//! integer. This is deliberately not a luma weighting: a saturated red and
//! a saturated blue of the same channel sum land on the same grid value.

use image::{GrayImage, Luma};

use crate::raster::{RasterImage, Rgb};

/// Background that transparent pixels are composited onto before
/// brightness is read.
pub const FLATTEN_BACKGROUND: Rgb = Rgb::WHITE;

/// `round((r + g + b) / 3)` for one pixel, alpha ignored.
#[inline]
pub fn brightness([r, g, b, _]: [u8; 4]) -> u8 {
    // The remainder of a division by 3 is never exactly one half, so
    // adding 1 before the floor division rounds to nearest.
    ((r as u16 + g as u16 + b as u16 + 1) / 3) as u8
}

/// Project an image to one brightness channel.
///
/// Partially transparent pixels are first composited onto
/// [`FLATTEN_BACKGROUND`].
pub fn to_grayscale(image: &RasterImage) -> GrayImage {
    let flat = image.flatten_onto(FLATTEN_BACKGROUND);
    GrayImage::from_fn(flat.width(), flat.height(), |x, y| {
        Luma([brightness(flat.pixel(x, y))])
    })
}

/// Mean brightness of `reference`, floored, shifted by `contrast`.
///
/// The result is not clamped: values at or below 0 yield an all-empty
/// grid and values above 255 an all-filled one. An empty reference
/// contributes a mean of 0.
pub fn compute_threshold(reference: &GrayImage, contrast: i32) -> i32 {
    let count = reference.width() as u64 * reference.height() as u64;
    let mean = if count == 0 {
        0
    } else {
        let sum: u64 = reference.as_raw().iter().map(|&v| v as u64).sum();
        (sum / count) as i32
    };
    mean.saturating_add(contrast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_is_rounded_average() {
        assert_eq!(brightness([128, 128, 128, 255]), 128);
        assert_eq!(brightness([255, 0, 0, 255]), 85);
        // 1/3 rounds down, 2/3 rounds up
        assert_eq!(brightness([1, 0, 0, 255]), 0);
        assert_eq!(brightness([1, 1, 0, 255]), 1);
        assert_eq!(brightness([255, 255, 255, 0]), 255);
    }

    #[test]
    fn test_brightness_is_not_luma_weighted() {
        assert_eq!(brightness([90, 0, 0, 255]), brightness([0, 0, 90, 255]));
    }

    #[test]
    fn test_grayscale_flattens_transparency_onto_white() {
        let image = RasterImage::filled(2, 2, [0, 0, 0, 0]);
        let gray = to_grayscale(&image);
        assert!(gray.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_threshold_is_floored_mean() {
        // 100, 101, 101, 101 -> mean 100.75 -> 100
        let gray = GrayImage::from_raw(2, 2, vec![100, 101, 101, 101]).unwrap();
        assert_eq!(compute_threshold(&gray, 0), 100);
    }

    #[test]
    fn test_contrast_shifts_without_clamping() {
        let gray = GrayImage::from_pixel(4, 4, Luma([250]));
        assert_eq!(compute_threshold(&gray, 10), 260);
        assert_eq!(compute_threshold(&gray, -300), -50);
    }

    #[test]
    fn test_empty_reference() {
        let gray = GrayImage::new(0, 0);
        assert_eq!(compute_threshold(&gray, 7), 7);
    }
}
