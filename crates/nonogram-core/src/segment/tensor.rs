//! Pure conversions between [`RasterImage`] and flat model tensors.
//!
//! Model runtimes want NCHW `f32` blobs at a fixed square resolution and
//! return a single-channel map of the same side length. These helpers do
//! the layout work so an adapter only has to hand buffers to its runtime.

use super::{ConfidenceMap, SegmentationError};
use crate::raster::RasterImage;
use crate::resample::resize_exact;

/// Default square input side of the salient-object model.
pub const DEFAULT_INPUT_SIZE: u32 = 250;

/// Default multiplier applied to 8-bit channel values.
pub const DEFAULT_INPUT_SCALE: f32 = 0.01;

/// Build a `1 x 3 x size x size` blob in R, G, B plane order.
///
/// The image is resampled to `size x size` (aspect ratio is not kept) and
/// every channel value is multiplied by `scale`. Alpha is dropped.
pub fn to_input_tensor(image: &RasterImage, size: u32, scale: f32) -> Vec<f32> {
    let resized = resize_exact(image, size, size);
    let plane = size as usize * size as usize;
    let mut tensor = vec![0.0f32; plane * 3];

    for (i, px) in resized.as_raw().chunks_exact(4).enumerate() {
        tensor[i] = px[0] as f32 * scale;
        tensor[plane + i] = px[1] as f32 * scale;
        tensor[2 * plane + i] = px[2] as f32 * scale;
    }

    tensor
}

impl ConfidenceMap {
    /// Reshape a flat model output into a `size x size` map.
    ///
    /// Outputs with leading batch/channel dimensions of 1 are accepted as
    /// long as the element count is exactly `size * size`.
    pub fn from_tensor(data: &[f32], size: u32) -> Result<Self, SegmentationError> {
        let expected = size as usize * size as usize;
        if data.is_empty() {
            return Err(SegmentationError::EmptyOutput);
        }
        if data.len() != expected {
            return Err(SegmentationError::TensorSize {
                expected,
                actual: data.len(),
            });
        }
        ConfidenceMap::new(size, size, data.to_vec())
    }
}
