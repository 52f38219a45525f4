use std::sync::Arc;

use nonogram_core::{
    DifficultyLevel, NonogramGrid, NonogramPipeline, RasterImage, RenderRequest, Rgb,
    SegmentationAdapter,
};

use crate::codec;
use crate::error::GenerateError;
use crate::models::AppConfig;
use crate::services::load_segmentation;

/// Per-request generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub difficulty: DifficultyLevel,
    /// Background dim factor; `None` uses the configured default.
    pub dim_factor: Option<f32>,
    pub highlight: Rgb,
    pub contrast: i32,
}

impl GenerateParams {
    pub fn new(difficulty: DifficultyLevel) -> Self {
        Self {
            difficulty,
            dim_factor: None,
            highlight: Rgb::RED,
            contrast: 0,
        }
    }
}

/// A finished puzzle with its images already PNG-encoded.
#[derive(Debug, Clone)]
pub struct GeneratedNonogram {
    pub grid: NonogramGrid,
    pub threshold: i32,
    pub preview_png: Vec<u8>,
    pub reference_png: Vec<u8>,
    /// False when segmentation was unavailable for this photo.
    pub background_removed: bool,
}

/// Generation service shared by the HTTP handlers and the CLI.
///
/// Cheap to clone; clones share the pipeline and its loaded model.
#[derive(Debug, Clone)]
pub struct NonogramService {
    pipeline: Arc<NonogramPipeline>,
    config: Arc<AppConfig>,
}

impl NonogramService {
    pub fn new(config: Arc<AppConfig>, segmentation: SegmentationAdapter) -> Self {
        let pipeline = NonogramPipeline::new(segmentation).with_options(config.pipeline_options());
        Self {
            pipeline: Arc::new(pipeline),
            config,
        }
    }

    /// Build the service and load the segmentation model named in `config`.
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let handle = load_segmentation(&config.model);
        Self::new(config, SegmentationAdapter::new(handle))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// "uninitialized", "loaded" or "failed".
    pub fn model_state(&self) -> &'static str {
        self.pipeline.segmentation().handle().state()
    }

    /// Decode a base64 upload and generate its puzzle.
    ///
    /// Decoding, rendering and encoding run on the blocking thread pool.
    pub async fn generate_from_base64(
        &self,
        image_base64: String,
        params: GenerateParams,
    ) -> Result<GeneratedNonogram, GenerateError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || {
            let image =
                codec::decode_base64_image(&image_base64, service.config.max_image_bytes)?;
            service.generate(image, &params)
        })
        .await
        .map_err(|e| GenerateError::Task(e.to_string()))?
    }

    /// Generate synchronously from decoded pixels.
    pub fn generate(
        &self,
        image: RasterImage,
        params: &GenerateParams,
    ) -> Result<GeneratedNonogram, GenerateError> {
        let request = RenderRequest::new(image, params.difficulty)
            .dim_factor(params.dim_factor.unwrap_or(self.config.default_dim_factor))
            .highlight(params.highlight)
            .contrast(params.contrast);

        let result = self.pipeline.render(&request)?;
        let preview_png = codec::encode_png(&result.preview)?;
        let reference_png = codec::encode_png(&result.reference)?;

        Ok(GeneratedNonogram {
            grid: result.grid,
            threshold: result.threshold,
            preview_png,
            reference_png,
            background_removed: result.degraded.is_none(),
        })
    }
}
