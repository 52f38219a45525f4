//! Foreground masks aligned to the source image.
//!
//! [`build_foreground_mask`] turns a model confidence map into a boolean
//! mask at the photo's native resolution. [`segment_foreground`] wraps the
//! whole step including the degradation to an all-foreground mask when the
//! segmentation service is unavailable.

mod dim;

pub use dim::{dim_partition, MaskSide, DIMMED_SIDE};

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

use crate::raster::RasterImage;
use crate::segment::{ConfidenceMap, SegmentationAdapter, SegmentationError};

/// Confidence at or above this value is foreground.
pub const FOREGROUND_CUTOFF: f32 = 0.5;

/// Interpolation used to bring the confidence map to native resolution.
const MASK_FILTER: FilterType = FilterType::Triangle;

/// Boolean subject/background partition, row-major. `true` = subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl ForegroundMask {
    /// Every pixel is subject. Dimming with this mask changes nothing.
    pub fn all_foreground(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn foreground_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_all_foreground(&self) -> bool {
        self.bits.iter().all(|&b| b)
    }

    /// True when the mask gates `image` (same width and height).
    pub fn matches(&self, image: &RasterImage) -> bool {
        (self.width, self.height) == image.dimensions()
    }
}

/// Resize `map` to `width x height` with bilinear interpolation and
/// binarize at [`FOREGROUND_CUTOFF`].
pub fn build_foreground_mask(map: &ConfidenceMap, width: u32, height: u32) -> ForegroundMask {
    if (map.width(), map.height()) == (width, height) {
        return ForegroundMask::from_fn(width, height, |x, y| map.get(x, y) >= FOREGROUND_CUTOFF);
    }

    let Some(source) = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(
        map.width(),
        map.height(),
        map.values().to_vec(),
    ) else {
        // ConfidenceMap guarantees values.len() == width * height
        return ForegroundMask::all_foreground(width, height);
    };

    let resized = imageops::resize(&source, width, height, MASK_FILTER);
    ForegroundMask::from_fn(width, height, |x, y| {
        resized.get_pixel(x, y).0[0] >= FOREGROUND_CUTOFF
    })
}

/// Segment `image` and return its mask, degrading instead of failing.
///
/// The second value carries the reason when the all-foreground fallback
/// was used.
pub fn segment_foreground(
    adapter: &SegmentationAdapter,
    image: &RasterImage,
) -> (ForegroundMask, Option<SegmentationError>) {
    let (width, height) = image.dimensions();
    match adapter.segment(image) {
        Ok(map) => {
            let mask = build_foreground_mask(&map, width, height);
            tracing::debug!(
                map_width = map.width(),
                map_height = map.height(),
                foreground = mask.foreground_count(),
                total = width as usize * height as usize,
                "Built foreground mask"
            );
            (mask, None)
        }
        Err(e) => {
            if e == SegmentationError::NotLoaded {
                tracing::debug!("No segmentation model, using all-foreground mask");
            } else {
                tracing::warn!(%e, "Segmentation unavailable, using all-foreground mask");
            }
            (ForegroundMask::all_foreground(width, height), Some(e))
        }
    }
}
