//! Assertion helpers for tests.

use axum::http::StatusCode;
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

/// Assert JSON error body carries the expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert an error response: HTTP status and JSON body agree
pub fn assert_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    assert_json_status(response, expected.as_u16());
}

/// Assert image response is well formed and return its decoded pixels
pub fn assert_valid_image_response(response: &TestResponse, width: u32, height: u32) -> Vec<u8> {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    assert!(json["job_id"].is_u64(), "Expected job_id");
    assert_eq!(json["width"], width);
    assert_eq!(json["height"], height);
    assert!(json["histogram"].is_object(), "Expected histogram object");

    let pixels = response.pixels();
    assert_eq!(pixels.len(), (width * height * 4) as usize);
    pixels
}

/// Assert every opaque output pixel is one of `colors` (`#rrggbb`)
pub fn assert_pixels_in(pixels: &[u8], colors: &[&str]) {
    for px in pixels.chunks_exact(4) {
        if px[3] == 0 {
            continue;
        }
        let hex = format!("#{:02x}{:02x}{:02x}", px[0], px[1], px[2]);
        assert!(
            colors.contains(&hex.as_str()),
            "Unexpected output color {hex}, allowed {colors:?}"
        );
    }
}
