//! Boundary to the foreground-segmentation model.
//!
//! The model itself is opaque: given an image it returns a per-pixel
//! foreground confidence map at its own input resolution. This module
//! defines that contract ([`SegmentationModel`]), the load lifecycle
//! ([`ModelHandle`]) and the adapter the pipeline talks to
//! ([`SegmentationAdapter`]).
//!
//! Loading is an explicit step performed by the caller. The resulting
//! handle is passed into the adapter at construction; nothing in this
//! crate holds a process-wide model.

mod static_mask;
pub mod tensor;

pub use static_mask::StaticMaskModel;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::raster::RasterImage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentationError {
    #[error("Segmentation model not loaded")]
    NotLoaded,

    #[error("Segmentation model failed to load: {0}")]
    LoadFailed(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Segmentation model returned an empty confidence map")]
    EmptyOutput,

    #[error("Segmentation model returned {count} non-finite confidence values")]
    InvalidOutput { count: usize },

    #[error("Tensor size mismatch: expected {expected} values, got {actual}")]
    TensorSize { expected: usize, actual: usize },
}

/// A foreground-segmentation model.
///
/// Implementations must be safe for concurrent read-only inference: the
/// same instance serves every request.
pub trait SegmentationModel: Send + Sync {
    /// Return a foreground confidence map for `image`.
    ///
    /// The map may have any resolution (usually the model's fixed input
    /// size); values are expected in `0.0..=1.0`.
    fn segment(&self, image: &RasterImage) -> Result<ConfidenceMap, SegmentationError>;

    /// Short human-readable name used in logs.
    fn name(&self) -> &str {
        "segmentation-model"
    }
}

/// Per-pixel foreground confidence, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl ConfidenceMap {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, SegmentationError> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(SegmentationError::TensorSize {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Map with the same confidence everywhere.
    pub fn uniform(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
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
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Load state of a segmentation model.
///
/// `Uninitialized` means no model was configured; `Failed` keeps the load
/// error for logging. Both make the adapter report
/// [`SegmentationError`] so the pipeline can degrade.
#[derive(Clone, Default)]
pub enum ModelHandle {
    #[default]
    Uninitialized,
    Loaded(Arc<dyn SegmentationModel>),
    Failed(String),
}

impl ModelHandle {
    pub fn uninitialized() -> Self {
        ModelHandle::Uninitialized
    }

    pub fn loaded(model: impl SegmentationModel + 'static) -> Self {
        ModelHandle::Loaded(Arc::new(model))
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        ModelHandle::Failed(reason.into())
    }

    /// Run a loader and record its outcome.
    ///
    /// Load errors are logged and kept; they never propagate.
    pub fn load_with<M, E, F>(loader: F) -> Self
    where
        M: SegmentationModel + 'static,
        E: fmt::Display,
        F: FnOnce() -> Result<M, E>,
    {
        match loader() {
            Ok(model) => {
                tracing::info!(model = model.name(), "Segmentation model loaded");
                ModelHandle::loaded(model)
            }
            Err(e) => {
                tracing::warn!(%e, "Segmentation model failed to load, background removal disabled");
                ModelHandle::failed(e.to_string())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelHandle::Loaded(_))
    }

    pub fn state(&self) -> &'static str {
        match self {
            ModelHandle::Uninitialized => "uninitialized",
            ModelHandle::Loaded(_) => "loaded",
            ModelHandle::Failed(_) => "failed",
        }
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelHandle::Uninitialized => write!(f, "ModelHandle::Uninitialized"),
            ModelHandle::Loaded(model) => write!(f, "ModelHandle::Loaded({})", model.name()),
            ModelHandle::Failed(reason) => write!(f, "ModelHandle::Failed({reason:?})"),
        }
    }
}

/// The pipeline's view of the segmentation service.
///
/// Cheap to clone; clones share the loaded model.
#[derive(Debug, Clone, Default)]
pub struct SegmentationAdapter {
    handle: ModelHandle,
}

impl SegmentationAdapter {
    pub fn new(handle: ModelHandle) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    /// Ask the model for a confidence map.
    ///
    /// Errors are returned, never retried. An empty map, or one holding NaN
    /// or infinite values, counts as an error.
    pub fn segment(&self, image: &RasterImage) -> Result<ConfidenceMap, SegmentationError> {
        match &self.handle {
            ModelHandle::Uninitialized => Err(SegmentationError::NotLoaded),
            ModelHandle::Failed(reason) => Err(SegmentationError::LoadFailed(reason.clone())),
            ModelHandle::Loaded(model) => {
                let map = model.segment(image)?;
                if map.is_empty() {
                    return Err(SegmentationError::EmptyOutput);
                }
                let count = map.values().iter().filter(|v| !v.is_finite()).count();
                if count > 0 {
                    return Err(SegmentationError::InvalidOutput { count });
                }
                Ok(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uniform(f32);

    impl SegmentationModel for Uniform {
        fn segment(&self, _image: &RasterImage) -> Result<ConfidenceMap, SegmentationError> {
            Ok(ConfidenceMap::uniform(4, 4, self.0))
        }
    }

    struct Empty;

    impl SegmentationModel for Empty {
        fn segment(&self, _image: &RasterImage) -> Result<ConfidenceMap, SegmentationError> {
            ConfidenceMap::new(0, 0, Vec::new())
        }
    }

    struct Garbage(Vec<f32>);

    impl SegmentationModel for Garbage {
        fn segment(&self, _image: &RasterImage) -> Result<ConfidenceMap, SegmentationError> {
            ConfidenceMap::new(self.0.len() as u32, 1, self.0.clone())
        }
    }

    fn image() -> RasterImage {
        RasterImage::filled(8, 8, [0, 0, 0, 255])
    }

    #[test]
    fn test_confidence_map_rejects_wrong_length() {
        let result = ConfidenceMap::new(2, 2, vec![0.0; 3]);
        assert_eq!(
            result,
            Err(SegmentationError::TensorSize {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_confidence_map_get_is_row_major() {
        let map = ConfidenceMap::new(2, 2, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
        assert_eq!(map.get(1, 0), 0.1);
        assert_eq!(map.get(0, 1), 0.2);
    }

    #[test]
    fn test_uninitialized_adapter_reports_not_loaded() {
        let adapter = SegmentationAdapter::new(ModelHandle::uninitialized());
        assert_eq!(adapter.segment(&image()), Err(SegmentationError::NotLoaded));
    }

    #[test]
    fn test_failed_handle_keeps_reason() {
        let handle = ModelHandle::load_with(|| Err::<Uniform, _>("file missing"));
        assert_eq!(handle.state(), "failed");

        let adapter = SegmentationAdapter::new(handle);
        assert_eq!(
            adapter.segment(&image()),
            Err(SegmentationError::LoadFailed("file missing".to_string()))
        );
    }

    #[test]
    fn test_loaded_adapter_returns_map() {
        let handle = ModelHandle::load_with(|| Ok::<_, String>(Uniform(0.75)));
        assert!(handle.is_loaded());

        let map = SegmentationAdapter::new(handle).segment(&image()).unwrap();
        assert_eq!((map.width(), map.height()), (4, 4));
        assert!(map.values().iter().all(|&v| v == 0.75));
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let adapter = SegmentationAdapter::new(ModelHandle::loaded(Empty));
        assert_eq!(adapter.segment(&image()), Err(SegmentationError::EmptyOutput));
    }

    #[test]
    fn test_non_finite_output_is_an_error() {
        let adapter = SegmentationAdapter::new(ModelHandle::loaded(Garbage(vec![
            0.9,
            f32::NAN,
            f32::INFINITY,
            0.1,
        ])));
        assert_eq!(
            adapter.segment(&image()),
            Err(SegmentationError::InvalidOutput { count: 2 })
        );

        let adapter = SegmentationAdapter::new(ModelHandle::loaded(Garbage(vec![0.0, 1.0])));
        assert!(adapter.segment(&image()).is_ok());
    }
}
