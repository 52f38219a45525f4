//! nonogram-core: turn a photograph into a square black/white nonogram grid
//!
//! The crate holds the deterministic image-to-grid pipeline. It has no
//! knowledge of HTTP, base64 or model runtimes; callers hand it decoded
//! pixels and an optional segmentation model and get back the puzzle grid
//! plus two images derived from the source photo.
//!
//! # Quick Start
//!
//! ```
//! use nonogram_core::{
//!     DifficultyLevel, ModelHandle, NonogramPipeline, RasterImage, RenderRequest, Rgb,
//!     SegmentationAdapter,
//! };
//!
//! // No segmentation model: the whole photo counts as subject.
//! let pipeline = NonogramPipeline::new(SegmentationAdapter::new(ModelHandle::uninitialized()));
//!
//! let photo = RasterImage::filled(100, 100, [128, 128, 128, 255]);
//! let request = RenderRequest::new(photo, DifficultyLevel::Easy)
//!     .dim_factor(1.0)
//!     .highlight(Rgb::RED);
//!
//! let result = pipeline.render(&request).unwrap();
//! assert_eq!(result.grid.size(), 20);
//! assert_eq!(result.threshold, 128);
//! assert_eq!(result.grid.filled_count(), 0);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! source photo ──> SegmentationAdapter ──> ConfidenceMap
//!     │                                        │
//!     │                         build_foreground_mask (bilinear, cutoff 0.5)
//!     │                                        │
//!     ├──────────────> dim_partition(photo, mask, dim_factor)
//!     │                        │
//!     │                 resize_exact(grid x grid)
//!     │                        │
//!     │                 to_grayscale ──> binarize(threshold) ──> NonogramGrid
//!     │                                        ^                    │
//!     ├──> resize_exact(grid x grid) ──> compute_threshold          │
//!     │         (reference image)                                   │
//!     └──> fit_within(500) ──────────────> render_preview <─────────┘
//! ```
//!
//! The threshold is sampled from the un-dimmed reference so that dimming
//! the background pushes background cells to "filled" or "empty" relative
//! to the photo's own average brightness instead of moving the average.
//!
//! # Degradation
//!
//! Segmentation is best effort. When the model is not loaded, failed to
//! load, errors, or returns an empty map, the pipeline uses an
//! all-foreground mask, which turns dimming into a no-op. Only an
//! unusable source image (zero area) aborts a render.

pub mod error;
pub mod grid;
pub mod mask;
pub mod pipeline;
pub mod preview;
pub mod raster;
pub mod resample;
pub mod segment;
pub mod threshold;


pub use error::PipelineError;
pub use grid::{binarize, DifficultyLevel, NonogramGrid, ParseDifficultyError};
pub use mask::{build_foreground_mask, dim_partition, ForegroundMask, MaskSide, DIMMED_SIDE};
pub use pipeline::{NonogramPipeline, PipelineOptions, RenderRequest, RenderResult};
pub use preview::{marker_opacity, render_preview};
pub use raster::{ParseRgbError, RasterImage, Rgb};
pub use resample::{fit_within, resize_exact};
pub use segment::{
    ConfidenceMap, ModelHandle, SegmentationAdapter, SegmentationError, SegmentationModel,
    StaticMaskModel,
};
pub use threshold::{brightness, compute_threshold, to_grayscale};
