//! Errors that abort a render.
//!
//! Segmentation problems are not listed here: they degrade to an
//! all-foreground mask inside the pipeline (see [`crate::segment`]).
//! A threshold pushed outside 0..=255 is not an error either.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source image cannot be used (undecodable, zero area, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,
}

impl PipelineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PipelineError::InvalidInput(message.into())
    }

    /// True for errors caused by the caller's image rather than by the pipeline.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_))
    }
}
