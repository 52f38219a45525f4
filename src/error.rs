use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nonogram_core::PipelineError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),
}

/// Failures while turning an uploaded photo into a puzzle.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Generation task failed: {0}")]
    Task(String),
}

impl GenerateError {
    /// True when the caller sent something unusable, as opposed to a
    /// failure on our side.
    pub fn is_client_error(&self) -> bool {
        match self {
            GenerateError::Codec(e) => e.is_client_error(),
            GenerateError::Pipeline(e) => e.is_invalid_input(),
            GenerateError::Task(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Image data is empty")]
    Empty,

    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl CodecError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CodecError::PngEncode(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Generate(GenerateError::Codec(CodecError::TooLarge { .. })) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::Generate(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Generate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_invalid_request() {
        let error = ApiError::InvalidRequest("unknown difficulty".to_string());
        assert_eq!(error.to_string(), "Invalid request: unknown difficulty");
    }

    #[test]
    fn test_codec_error_too_large() {
        let error = CodecError::TooLarge {
            size: 100_000,
            max: 90_000,
        };
        assert_eq!(
            error.to_string(),
            "Image too large: 100000 bytes (max 90000)"
        );
    }

    #[test]
    fn test_codec_error_zero_area() {
        let error = CodecError::ZeroArea {
            width: 0,
            height: 12,
        };
        assert_eq!(error.to_string(), "Image has zero area (0x12)");
    }

    #[test]
    fn test_generate_error_passes_message_through() {
        let error: GenerateError = CodecError::Empty.into();
        assert_eq!(error.to_string(), "Image data is empty");

        let api: ApiError = error.into();
        assert_eq!(api.to_string(), "Generation error: Image data is empty");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(GenerateError::from(CodecError::Empty).is_client_error());
        assert!(GenerateError::from(PipelineError::invalid_input("zero area")).is_client_error());
        assert!(!GenerateError::from(CodecError::PngEncode("oops".into())).is_client_error());
        assert!(!GenerateError::Task("panicked".into()).is_client_error());
        assert!(!GenerateError::from(PipelineError::PixmapAllocation).is_client_error());
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Generate(CodecError::Empty.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Generate(
            CodecError::TooLarge {
                size: 20,
                max: 10,
            }
            .into(),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::Generate(GenerateError::Task("join".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
