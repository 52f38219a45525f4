//! Antialiased resampling.
//!
//! Downscale ratios are large (a 3000 px photo to a 20 x 20 grid), so the
//! filter support is widened by the scale factor and every source pixel
//! contributes to its output cell. Nearest-neighbor is never used.

use image::imageops::{self, FilterType};

use crate::raster::RasterImage;

/// Filter for photo resampling.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Default cap on the longer side of the preview copy.
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 500;

/// Scale `image` to exactly `width x height`, ignoring aspect ratio.
pub fn resize_exact(image: &RasterImage, width: u32, height: u32) -> RasterImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    RasterImage::from(imageops::resize(image.as_rgba(), width, height, RESAMPLE_FILTER))
}

/// Target size for fitting `(width, height)` inside a `max_dimension` square.
///
/// Returns the input unchanged when both sides already fit. Otherwise the
/// longer side becomes `max_dimension` and the shorter side is scaled
/// proportionally (rounded, at least 1).
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let max_dimension = max_dimension.max(1);
    let scale_short = |short: u32, long: u32| -> u32 {
        ((short as u64 * max_dimension as u64 + long as u64 / 2) / long as u64).max(1) as u32
    };

    if width >= height {
        (max_dimension, scale_short(height, width))
    } else {
        (scale_short(width, height), max_dimension)
    }
}

/// Downscale `image` so neither side exceeds `max_dimension`.
///
/// Images that already fit are returned as-is; the aspect ratio is kept.
pub fn fit_within(image: &RasterImage, max_dimension: u32) -> RasterImage {
    let (width, height) = fit_dimensions(image.width(), image.height(), max_dimension);
    resize_exact(image, width, height)
}
