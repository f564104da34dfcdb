use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dither_core::{EngineError, PaletteError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Image too large: {width}x{height} (max {max_width}x{max_height})")]
    TooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Transform rejected: {0}")]
    Rejected(String),

    #[error("Job {0} superseded by a newer request")]
    Superseded(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::ParseColor(_)
            | EngineError::Palette(
                PaletteError::ParseColor { .. } | PaletteError::ParseReplacement { .. },
            ) => ApiError::InvalidRequest(e.to_string()),
            _ => ApiError::Rejected(e.to_string()),
        }
    }
}

impl From<PaletteError> for ApiError {
    fn from(e: PaletteError) -> Self {
        EngineError::from(e).into()
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(e: base64::DecodeError) -> Self {
        ApiError::InvalidRequest(format!("pixels: {e}"))
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported PNG layout: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) | ApiError::TooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Superseded(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
