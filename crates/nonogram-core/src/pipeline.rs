//! The image-to-grid pipeline.
//!
//! [`NonogramPipeline`] owns the segmentation adapter and the few options
//! that are deployment settings rather than per-request inputs. Rendering
//! is synchronous and pure given the request and the model's output; one
//! pipeline can serve concurrent requests from several threads.

use crate::error::PipelineError;
use crate::grid::{binarize, DifficultyLevel, NonogramGrid};
use crate::mask::{dim_partition, segment_foreground};
use crate::preview::render_preview;
use crate::raster::{RasterImage, Rgb};
use crate::resample::{fit_within, resize_exact, DEFAULT_PREVIEW_MAX_DIMENSION};
use crate::segment::{SegmentationAdapter, SegmentationError};
use crate::threshold::{compute_threshold, to_grayscale};

/// Deployment-level pipeline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Longest side of the preview copy. Smaller photos are not upscaled.
    pub preview_max_dimension: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preview_max_dimension: DEFAULT_PREVIEW_MAX_DIMENSION,
        }
    }
}

/// One render call's inputs.
///
/// # Example
///
/// ```
/// use nonogram_core::{DifficultyLevel, RasterImage, RenderRequest, Rgb};
///
/// let request = RenderRequest::new(RasterImage::filled(64, 64, [0, 0, 0, 255]), DifficultyLevel::Hard)
///     .dim_factor(0.3)
///     .highlight(Rgb::BLUE)
///     .contrast(-5);
/// assert_eq!(request.contrast, -5);
/// ```
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub source: RasterImage,
    pub difficulty: DifficultyLevel,
    /// Multiplier applied to background pixels. Not range-checked.
    pub dim_factor: f32,
    pub highlight: Rgb,
    /// Signed shift applied to the computed threshold.
    pub contrast: i32,
}

impl RenderRequest {
    /// Request with no dimming, red markers and no contrast shift.
    pub fn new(source: RasterImage, difficulty: DifficultyLevel) -> Self {
        Self {
            source,
            difficulty,
            dim_factor: 1.0,
            highlight: Rgb::RED,
            contrast: 0,
        }
    }

    #[inline]
    pub fn dim_factor(mut self, dim_factor: f32) -> Self {
        self.dim_factor = dim_factor;
        self
    }

    #[inline]
    pub fn highlight(mut self, highlight: Rgb) -> Self {
        self.highlight = highlight;
        self
    }

    #[inline]
    pub fn contrast(mut self, contrast: i32) -> Self {
        self.contrast = contrast;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub grid: NonogramGrid,
    /// Source photo (capped for display) with filled-cell markers.
    pub preview: RasterImage,
    /// Un-dimmed source downscaled to `grid_size x grid_size`.
    pub reference: RasterImage,
    /// Threshold used for binarization, after the contrast shift.
    pub threshold: i32,
    /// Set when segmentation was unavailable and the whole photo was
    /// treated as subject.
    pub degraded: Option<SegmentationError>,
}

#[derive(Debug, Clone, Default)]
pub struct NonogramPipeline {
    segmentation: SegmentationAdapter,
    options: PipelineOptions,
}

impl NonogramPipeline {
    pub fn new(segmentation: SegmentationAdapter) -> Self {
        Self {
            segmentation,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn segmentation(&self) -> &SegmentationAdapter {
        &self.segmentation
    }

    /// Run the full pipeline.
    ///
    /// Fails only when the source image has zero area. Segmentation
    /// problems degrade to an all-foreground mask and are reported in
    /// [`RenderResult::degraded`].
    pub fn render(&self, request: &RenderRequest) -> Result<RenderResult, PipelineError> {
        let source = &request.source;
        if source.is_empty() {
            return Err(PipelineError::invalid_input(format!(
                "image has zero area ({}x{})",
                source.width(),
                source.height()
            )));
        }

        let grid_size = request.difficulty.grid_size();

        let (mask, degraded) = segment_foreground(&self.segmentation, source);
        let dimmed = dim_partition(source, &mask, request.dim_factor);

        let puzzle = resize_exact(&dimmed, grid_size, grid_size);
        let reference = resize_exact(source, grid_size, grid_size);

        let threshold = compute_threshold(&to_grayscale(&reference), request.contrast);
        let grid = binarize(&to_grayscale(&puzzle), threshold);

        let preview_base = fit_within(source, self.options.preview_max_dimension);
        let preview = render_preview(&grid, &preview_base, threshold, request.highlight)?;

        tracing::info!(
            source_width = source.width(),
            source_height = source.height(),
            difficulty = %request.difficulty,
            grid_size,
            threshold,
            filled = grid.filled_count(),
            degraded = degraded.is_some(),
            "Rendered nonogram"
        );

        Ok(RenderResult {
            grid,
            preview,
            reference,
            threshold,
            degraded,
        })
    }
}
