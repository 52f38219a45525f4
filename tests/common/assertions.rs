//! Assertion helpers for tests.

use axum::http::StatusCode;
use nonogrammer::api::GenerateNonogramResponse;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response with the JSON `{status, error}` body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();

    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}. Full response: {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    json["error"]
        .as_str()
        .expect("Expected error message string")
        .to_string()
}

/// Assert a successful generation response with a `size x size` grid
pub fn assert_valid_nonogram(response: &TestResponse, size: usize) -> GenerateNonogramResponse {
    assert_ok(response);
    let body: GenerateNonogramResponse = response.json();

    assert_eq!(body.grid_size, size);
    assert_eq!(body.nonogram.len(), size, "Expected {size} columns");
    for column in &body.nonogram {
        assert_eq!(column.len(), size, "Expected {size} cells per column");
    }
    assert_eq!(body.row_clues.len(), size);
    assert_eq!(body.column_clues.len(), size);
    assert!(!body.preview_image_base64.is_empty());
    assert!(!body.original_downscaled_image_base64.is_empty());
    body
}

pub fn filled_count(body: &GenerateNonogramResponse) -> usize {
    body.nonogram.iter().flatten().filter(|&&c| c).count()
}
