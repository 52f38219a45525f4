//! A "model" that serves a precomputed mask image.
//!
//! Useful when segmentation already ran elsewhere (an external background
//! remover, a hand-painted mask) and for deterministic tests. The mask is
//! returned for every input; the mask builder rescales it to the photo.

use std::path::Path;

use super::{ConfidenceMap, SegmentationError, SegmentationModel};
use crate::raster::RasterImage;

#[derive(Debug, Clone)]
pub struct StaticMaskModel {
    map: ConfidenceMap,
}

impl StaticMaskModel {
    pub fn new(map: ConfidenceMap) -> Self {
        Self { map }
    }

    /// Use an image as the mask: brightness 255 is subject, 0 is background.
    ///
    /// Transparent pixels count as background.
    pub fn from_image(mask: &RasterImage) -> Self {
        let values = mask
            .as_raw()
            .chunks_exact(4)
            .map(|px| {
                let luma = (px[0] as f32 + px[1] as f32 + px[2] as f32) / (3.0 * 255.0);
                luma * (px[3] as f32 / 255.0)
            })
            .collect();
        Self {
            map: ConfidenceMap {
                width: mask.width(),
                height: mask.height(),
                values,
            },
        }
    }

    /// Load a PNG or JPEG mask from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SegmentationError> {
        let path = path.as_ref();
        let decoded = image::open(path)
            .map_err(|e| SegmentationError::LoadFailed(format!("{}: {e}", path.display())))?;
        let mask = RasterImage::from(decoded);
        if mask.is_empty() {
            return Err(SegmentationError::LoadFailed(format!(
                "{}: mask has zero area",
                path.display()
            )));
        }
        Ok(Self::from_image(&mask))
    }

    pub fn map(&self) -> &ConfidenceMap {
        &self.map
    }
}

impl SegmentationModel for StaticMaskModel {
    fn segment(&self, _image: &RasterImage) -> Result<ConfidenceMap, SegmentationError> {
        Ok(self.map.clone())
    }

    fn name(&self) -> &str {
        "static-mask"
    }
}
