use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use nonogram_core::DifficultyLevel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{parse_highlight, HighlightColor};
use crate::services::{GenerateParams, GeneratedNonogram, NonogramService};

/// Request body for puzzle generation
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNonogramRequest {
    /// PNG or JPEG file contents, base64 encoded. A `data:` URL prefix is accepted.
    pub image_base64: String,
    /// EASY (20x20), MEDIUM (30x30) or HARD (40x40)
    #[schema(example = "EASY")]
    pub difficulty: String,
    /// Multiplier applied to background pixels; defaults to the server setting
    #[serde(default)]
    #[schema(example = 0.3)]
    pub pixel_highlight_value: Option<f32>,
    /// RED, BLUE, PINK, BLACK or a #RRGGBB hex code
    #[serde(default)]
    #[schema(example = "RED")]
    pub preview_image_highlight_color: Option<String>,
    /// Signed shift added to the computed threshold
    #[serde(default)]
    pub contrast: i32,
}

/// Generated puzzle
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNonogramResponse {
    /// Cells indexed `[x][y]`; `true` is a filled cell
    pub nonogram: Vec<Vec<bool>>,
    /// Cells per side
    pub grid_size: usize,
    /// Brightness threshold used, after the contrast shift
    pub threshold: i32,
    /// Run lengths of filled cells, one list per row (top to bottom)
    pub row_clues: Vec<Vec<usize>>,
    /// Run lengths of filled cells, one list per column (left to right)
    pub column_clues: Vec<Vec<usize>>,
    /// False when the segmentation model was unavailable
    pub background_removed: bool,
    /// Source photo with filled cells highlighted, base64 PNG
    pub preview_image_base64: String,
    /// Source photo downscaled to the grid size, base64 PNG
    pub original_downscaled_image_base64: String,
}

impl From<GeneratedNonogram> for GenerateNonogramResponse {
    fn from(generated: GeneratedNonogram) -> Self {
        Self {
            nonogram: generated.grid.to_nested(),
            grid_size: generated.grid.size(),
            threshold: generated.threshold,
            row_clues: generated.grid.row_clues(),
            column_clues: generated.grid.column_clues(),
            background_removed: generated.background_removed,
            preview_image_base64: STANDARD.encode(&generated.preview_png),
            original_downscaled_image_base64: STANDARD.encode(&generated.reference_png),
        }
    }
}

impl GenerateNonogramRequest {
    /// Validate the scalar fields, leaving the image for the service.
    pub fn into_parts(self) -> Result<(String, GenerateParams), ApiError> {
        let difficulty = self
            .difficulty
            .parse::<DifficultyLevel>()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let highlight = match self.preview_image_highlight_color.as_deref() {
            Some(color) => {
                parse_highlight(color).map_err(|e| ApiError::InvalidRequest(e.to_string()))?
            }
            None => HighlightColor::default().rgb(),
        };

        Ok((
            self.image_base64,
            GenerateParams {
                difficulty,
                dim_factor: self.pixel_highlight_value,
                highlight,
                contrast: self.contrast,
            },
        ))
    }
}

/// Generate a nonogram from a photo
///
/// Removes (dims) the photo's background, downsamples it to the grid size
/// and fills every cell darker than the photo's average brightness.
#[utoipa::path(
    post,
    path = "/api/v1/generate-nonogram",
    request_body = GenerateNonogramRequest,
    responses(
        (status = 200, description = "Puzzle generated", body = GenerateNonogramResponse),
        (status = 400, description = "Invalid parameters or undecodable image"),
        (status = 413, description = "Image exceeds the upload limit"),
        (status = 500, description = "Generation failed"),
    ),
    tag = "Nonogram"
)]
pub async fn handle_generate_nonogram(
    State(service): State<NonogramService>,
    payload: Result<Json<GenerateNonogramRequest>, JsonRejection>,
) -> Result<Json<GenerateNonogramResponse>, ApiError> {
    let Json(request) = payload?;
    let (image_base64, params) = request.into_parts()?;

    tracing::info!(
        difficulty = %params.difficulty,
        dim_factor = ?params.dim_factor,
        highlight = %params.highlight,
        contrast = params.contrast,
        upload_len = image_base64.len(),
        "Nonogram requested"
    );

    let generated = service.generate_from_base64(image_base64, params).await?;

    tracing::info!(
        grid_size = generated.grid.size(),
        filled = generated.grid.filled_count(),
        threshold = generated.threshold,
        background_removed = generated.background_removed,
        "Nonogram generated"
    );

    Ok(Json(generated.into()))
}
