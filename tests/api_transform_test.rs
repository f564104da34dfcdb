//! Integration tests for the transform endpoints.

mod common;

use axum::http::StatusCode;
use common::fixtures::{gray_ramp, image_body, solid, two_tone, with_fields};
use common::*;
use ditherkit::models::AppConfig;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_dither_black_and_white_unchanged() {
    let app = TestApp::new();
    let pixels = [
        0, 0, 0, 255, 255, 255, 255, 255, //
        255, 255, 255, 255, 0, 0, 0, 255,
    ];
    let body = with_fields(image_body(2, 2, &pixels), json!({ "method": "bitmap" }));

    let response = app.post_json("/api/dither", &body).await;
    let output = assert_valid_image_response(&response, 2, 2);

    assert_eq!(output, pixels.to_vec());
    let json: Value = response.json();
    assert_eq!(json["histogram"]["#000000"], 2);
    assert_eq!(json["histogram"]["#ffffff"], 2);
}

#[tokio::test]
async fn test_dither_threshold() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(2, 2, &solid(2, 2, [200, 200, 200, 255])),
        json!({ "method": "bitmap", "threshold": 150 }),
    );

    let response = app.post_json("/api/dither", &body).await;
    let output = assert_valid_image_response(&response, 2, 2);

    assert_eq!(output, solid(2, 2, [255, 255, 255, 255]));
    let json: Value = response.json();
    assert_eq!(json["histogram"], json!({ "#ffffff": 4 }));
}

#[tokio::test]
async fn test_dither_every_method_is_binary() {
    let app = TestApp::new();
    let methods = [
        "floyd-steinberg",
        "atkinson",
        "jarvis",
        "stucki",
        "bayer2",
        "bayer4",
        "bayer8",
        "clustered4",
        "random",
        "blue-noise",
    ];

    for method in methods {
        let body = with_fields(
            image_body(16, 4, &gray_ramp(16, 4)),
            json!({ "method": method, "seed": 7 }),
        );
        let response = app.post_json("/api/dither", &body).await;
        let output = assert_valid_image_response(&response, 16, 4);
        assert_pixels_in(&output, &["#000000", "#ffffff"]);
    }
}

#[tokio::test]
async fn test_dither_unknown_method_falls_back() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [10, 10, 10, 255])),
        json!({ "method": "not-a-method" }),
    );

    let response = app.post_json("/api/dither", &body).await;
    let output = assert_valid_image_response(&response, 1, 1);
    assert_eq!(output, vec![0, 0, 0, 255]);
}

#[tokio::test]
async fn test_dither_echoes_job_id() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [0, 0, 0, 255])),
        json!({ "job_id": 1234 }),
    );

    let response = app.post_json("/api/dither", &body).await;
    assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json["job_id"], 1234);
}

#[tokio::test]
async fn test_dither_invalid_base64() {
    let app = TestApp::new();
    let body = json!({ "width": 1, "height": 1, "pixels": "!!not base64!!" });

    let response = app.post_json("/api/dither", &body).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dither_dimension_mismatch_is_rejected() {
    let app = TestApp::new();
    let body = image_body(3, 3, &solid(2, 2, [0, 0, 0, 255]));

    let response = app.post_json("/api/dither", &body).await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY);

    let json: Value = response.json();
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("invalid dimensions"));
}

#[tokio::test]
async fn test_dither_over_size_limit() {
    let mut config = AppConfig::default();
    config.limits.max_width = 4;
    let app = TestApp::with_config(config);
    let body = image_body(8, 1, &solid(8, 1, [0, 0, 0, 255]));

    let response = app.post_json("/api/dither", &body).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = AppConfig::default();
    config.server.max_body_bytes = 64;
    let app = TestApp::with_config(config);
    let body = image_body(16, 16, &solid(16, 16, [0, 0, 0, 255]));

    let response = app.post_json("/api/dither", &body).await;
    assert_status(&response, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_quantize_output_stays_in_palette() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(16, 4, &gray_ramp(16, 4)),
        json!({
            "method": "floyd-steinberg",
            "palette": [{ "color": "#000000" }, { "color": "#808080" }, { "color": "#ffffff" }],
        }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    let output = assert_valid_image_response(&response, 16, 4);
    assert_pixels_in(&output, &["#000000", "#808080", "#ffffff"]);
}

#[tokio::test]
async fn test_quantize_applies_replacements() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(16, 4, &gray_ramp(16, 4)),
        json!({
            "method": "bayer4",
            "palette": [{ "color": "#000" }, { "color": "#fff" }],
            "replacements": { "#000000": "#112233" },
        }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    let output = assert_valid_image_response(&response, 16, 4);
    assert_pixels_in(&output, &["#112233", "#ffffff"]);

    let json: Value = response.json();
    assert!(json["histogram"]["#000000"].is_null());
    assert!(json["histogram"]["#112233"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_quantize_luminance_threshold_makes_pixels_transparent() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [200, 200, 200, 255])),
        json!({
            "method": "bitmap",
            "palette": [{ "color": "#000000", "threshold": 0.3 }],
        }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    let output = assert_valid_image_response(&response, 1, 1);

    assert_eq!(output[3], 0);
    let json: Value = response.json();
    assert_eq!(json["histogram"], json!({}));
}

#[tokio::test]
async fn test_quantize_empty_palette_is_rejected() {
    let app = TestApp::new();
    let body = image_body(1, 1, &solid(1, 1, [0, 0, 0, 255]));

    let response = app.post_json("/api/quantize", &body).await;
    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_quantize_bad_palette_color() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [0, 0, 0, 255])),
        json!({ "palette": [{ "color": "#00000g" }] }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quantize_signed_palette_color_is_rejected() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [0, 0, 0, 255])),
        json!({ "palette": [{ "color": "#+f+f+f" }] }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quantize_bad_replacement_color() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(1, 1, &solid(1, 1, [0, 0, 0, 255])),
        json!({
            "palette": [{ "color": "#000000" }],
            "replacements": { "#000000": "purple" },
        }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quantize_with_auto_palette() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(8, 4, &two_tone(8, 4)),
        json!({
            "method": "bitmap",
            "auto_palette": { "method": "median-cut", "size": 2 },
        }),
    );

    let response = app.post_json("/api/quantize", &body).await;
    let output = assert_valid_image_response(&response, 8, 4);

    assert_eq!(output, two_tone(8, 4));
    let json: Value = response.json();
    assert_eq!(json["histogram"], json!({ "#dc1414": 16, "#1414dc": 16 }));
}

#[tokio::test]
async fn test_palette_median_cut() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(8, 4, &two_tone(8, 4)),
        json!({ "method": "median-cut", "size": 2 }),
    );

    let response = app.post_json("/api/palette", &body).await;
    assert_ok(&response);

    let json: Value = response.json();
    let mut colors: Vec<String> = serde_json::from_value(json["colors"].clone()).unwrap();
    colors.sort();
    assert_eq!(colors, vec!["#1414dc".to_string(), "#dc1414".to_string()]);
}

#[tokio::test]
async fn test_palette_returns_requested_size_for_every_method() {
    let app = TestApp::new();
    let methods = [
        "kmeans",
        "median-cut",
        "frequency",
        "hue",
        "extreme",
        "pronounced",
        "varied",
        "distant",
        "contrasting",
    ];

    for method in methods {
        let body = with_fields(
            image_body(16, 4, &gray_ramp(16, 4)),
            json!({ "method": method, "size": 5, "seed": 11 }),
        );
        let response = app.post_json("/api/palette", &body).await;
        assert_ok(&response);

        let json: Value = response.json();
        assert_eq!(
            json["colors"].as_array().unwrap().len(),
            5,
            "method {method} returned {}",
            json["colors"]
        );
    }
}

#[tokio::test]
async fn test_palette_contrasting_starts_with_brightest() {
    let app = TestApp::new();
    let body = with_fields(
        image_body(16, 1, &gray_ramp(16, 1)),
        json!({ "method": "contrasting", "size": 3 }),
    );

    let response = app.post_json("/api/palette", &body).await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["colors"][0], "#ffffff");
}

#[tokio::test]
async fn test_palette_defaults_from_config() {
    let mut config = AppConfig::default();
    config.defaults.palette_size = 3;
    let app = TestApp::with_config(config);
    let body = image_body(4, 4, &gray_ramp(4, 4));

    let response = app.post_json("/api/palette", &body).await;
    assert_ok(&response);

    let json: Value = response.json();
    assert_eq!(json["colors"].as_array().unwrap().len(), 3);
}
