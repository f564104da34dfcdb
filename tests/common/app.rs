//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use ditherkit::models::AppConfig;
use ditherkit::server::{build_router, create_app_state, AppState};
use ditherkit::services::{JobTracker, TransformWorker};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub worker: Arc<TransformWorker>,
    pub tracker: Arc<JobTracker>,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config);

        // Keep references for test assertions
        let worker = state.worker.clone();
        let tracker = state.tracker.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            worker,
            tracker,
        }
    }

    /// Create application state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(AppConfig::default())
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> TestResponse {
        self.post_raw(path, body.to_string()).await
    }

    /// Make a POST request with a raw JSON string body
    pub async fn post_raw(&self, path: &str, body: String) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Decode the base64 `pixels` field of an image response
    pub fn pixels(&self) -> Vec<u8> {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let json: serde_json::Value = self.json();
        let encoded = json["pixels"].as_str().expect("Expected pixels string");
        STANDARD.decode(encoded).expect("Expected valid base64 pixels")
    }
}
