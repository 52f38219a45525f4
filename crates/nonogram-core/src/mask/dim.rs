//! Mask-gated dimming.
//!
//! Pixels on [`DIMMED_SIDE`] of the mask have R, G and B multiplied by the
//! dim factor. Dimming the background pushes it toward black, so the grid
//! threshold (taken from the un-dimmed photo) separates the subject's
//! silhouette from a uniformly dark surround.

use super::ForegroundMask;
use crate::raster::RasterImage;

/// One side of the subject/background partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSide {
    Subject,
    Background,
}

/// The side whose pixels get attenuated.
pub const DIMMED_SIDE: MaskSide = MaskSide::Background;

impl MaskSide {
    #[inline]
    fn contains(self, is_foreground: bool) -> bool {
        match self {
            MaskSide::Subject => is_foreground,
            MaskSide::Background => !is_foreground,
        }
    }
}

/// Return a copy of `image` with the [`DIMMED_SIDE`] pixels scaled by
/// `dim_factor`.
///
/// Channels are truncated and clamped to `0..=255`, so factors above 1.0
/// brighten and negative factors produce black. Alpha is never touched.
/// `mask` must have the image's dimensions.
pub fn dim_partition(image: &RasterImage, mask: &ForegroundMask, dim_factor: f32) -> RasterImage {
    debug_assert!(
        mask.matches(image),
        "mask {}x{} does not gate image {}x{}",
        mask.width(),
        mask.height(),
        image.width(),
        image.height()
    );

    let scale = |c: u8| -> u8 { (c as f32 * dim_factor).clamp(0.0, 255.0) as u8 };

    image.map_pixels(|x, y, [r, g, b, a]| {
        if DIMMED_SIDE.contains(mask.is_foreground(x, y)) {
            [scale(r), scale(g), scale(b), a]
        } else {
            [r, g, b, a]
        }
    })
}
