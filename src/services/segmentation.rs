use nonogram_core::{ModelHandle, StaticMaskModel};

use crate::models::ModelConfig;

/// Load the configured segmentation model.
///
/// No model configured leaves the handle uninitialized. A model that fails
/// to load is recorded as failed; either way renders still succeed with
/// background removal disabled.
pub fn load_segmentation(config: &ModelConfig) -> ModelHandle {
    match &config.mask_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading static mask model");
            ModelHandle::load_with(|| StaticMaskModel::open(path))
        }
        None => {
            tracing::info!("No segmentation model configured, background removal disabled");
            ModelHandle::uninitialized()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_no_model_configured() {
        let handle = load_segmentation(&ModelConfig::default());
        assert_eq!(handle.state(), "uninitialized");
    }

    #[test]
    fn test_missing_mask_is_failed_not_fatal() {
        let config = ModelConfig {
            mask_file: Some(PathBuf::from("/nonexistent/mask.png")),
        };
        let handle = load_segmentation(&config);
        assert_eq!(handle.state(), "failed");
    }

    #[test]
    fn test_mask_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();

        let handle = load_segmentation(&ModelConfig {
            mask_file: Some(path),
        });
        assert!(handle.is_loaded());
    }
}
