use std::collections::HashMap;
use std::future::Future;

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dither_core::{
    ColorReplacementMap, DitherSpec, Operation, PaletteEntry, Rgb, TransformRequest,
    TransformResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::services::AutoPalette;

/// Source image: RGBA8 pixels, base64 (standard alphabet), row-major
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Base64 of `width * height * 4` bytes
    pub pixels: String,
}

/// Dither settings; anything left out comes from the server defaults
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DitherParams {
    /// Strategy name, e.g. `floyd-steinberg`, `atkinson`, `bayer8`, `blue-noise`, `stretch`
    #[serde(default)]
    pub method: Option<String>,
    /// Cutoff for threshold-based strategies (0-255)
    #[serde(default)]
    pub threshold: Option<u8>,
    /// Error or noise strength multiplier
    #[serde(default)]
    pub factor: Option<f32>,
    /// Contrast stretch amount in percent
    #[serde(default)]
    pub stretch: Option<f32>,
    /// Fixes random noise and seeded extraction
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Correlation fields shared by every request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct JobParams {
    /// Caller-assigned job id; allocated by the server when absent
    #[serde(default)]
    pub job_id: Option<u64>,
    /// Requests on the same channel supersede each other
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DitherRequest {
    #[serde(flatten)]
    pub image: ImageData,
    #[serde(flatten)]
    pub dither: DitherParams,
    #[serde(flatten)]
    pub job: JobParams,
}

/// One palette color with its luminance threshold
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaletteColor {
    /// `#RRGGBB` or `#RGB`
    pub color: String,
    /// Highest normalized source luminance (0.0-1.0) this color may cover
    #[serde(default)]
    pub threshold: Option<f32>,
}

/// Extract the quantization palette from the image itself
#[derive(Debug, Deserialize, ToSchema)]
pub struct AutoPaletteParams {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuantizeRequest {
    #[serde(flatten)]
    pub image: ImageData,
    #[serde(flatten)]
    pub dither: DitherParams,
    #[serde(flatten)]
    pub job: JobParams,
    #[serde(default)]
    pub palette: Vec<PaletteColor>,
    /// Output color substitutions, `#from` → `#to`
    #[serde(default)]
    pub replacements: HashMap<String, String>,
    #[serde(default)]
    pub auto_palette: Option<AutoPaletteParams>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaletteRequest {
    #[serde(flatten)]
    pub image: ImageData,
    #[serde(flatten)]
    pub job: JobParams,
    /// Extraction strategy, e.g. `kmeans`, `median-cut`, `contrasting`
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(default)]
    pub sample_cap: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Transformed image
#[derive(Debug, Serialize, ToSchema)]
pub struct ImageResponse {
    pub job_id: u64,
    pub width: u32,
    pub height: u32,
    /// Base64 RGBA8
    pub pixels: String,
    /// `#rrggbb` → number of opaque pixels
    pub histogram: HashMap<String, u32>,
}

/// Extracted palette
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteResponse {
    pub job_id: u64,
    /// `#rrggbb` colors
    pub colors: Vec<String>,
}

/// Dither an image to black and white
#[utoipa::path(
    post,
    path = "/api/dither",
    request_body = DitherRequest,
    responses(
        (status = 200, description = "Dithered image", body = ImageResponse),
        (status = 400, description = "Malformed request or image too large"),
        (status = 409, description = "Superseded by a newer job on the same channel"),
        (status = 422, description = "Image rejected by the engine"),
    ),
    tag = "Transform"
)]
pub async fn handle_dither(
    State(state): State<AppState>,
    Json(req): Json<DitherRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let pixels = decode_image(&state, &req.image)?;
    let spec = dither_spec(&state, &req.dither);
    let job_id = begin_job(&state, &req.job).await?;

    let request = TransformRequest::new(
        job_id,
        Operation::Dither,
        req.image.width,
        req.image.height,
        pixels,
    )
    .with_dither(spec);

    let worker = state.worker.clone();
    let work = async move { worker.run(request).await };
    run_job(&state, &req.job, job_id, work).await.and_then(image_response)
}

/// Reduce an image to a palette
///
/// The palette is either given explicitly or extracted from the image first
/// when `auto_palette` is set.
#[utoipa::path(
    post,
    path = "/api/quantize",
    request_body = QuantizeRequest,
    responses(
        (status = 200, description = "Quantized image", body = ImageResponse),
        (status = 400, description = "Malformed request, bad color, or image too large"),
        (status = 409, description = "Superseded by a newer job on the same channel"),
        (status = 422, description = "Image or palette rejected by the engine"),
    ),
    tag = "Transform"
)]
pub async fn handle_quantize(
    State(state): State<AppState>,
    Json(req): Json<QuantizeRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    let pixels = decode_image(&state, &req.image)?;
    let palette = parse_palette(&req.palette)?;
    let replacements = ColorReplacementMap::from_hex_pairs(&req.replacements)?;
    let spec = dither_spec(&state, &req.dither);
    let job_id = begin_job(&state, &req.job).await?;

    let defaults = &state.config.defaults;
    let request = TransformRequest::new(
        job_id,
        Operation::Quantize,
        req.image.width,
        req.image.height,
        pixels,
    )
    .with_dither(spec)
    .with_palette(palette)
    .with_replacements(replacements)
    .with_sample_cap(defaults.sample_cap);

    let auto = req.auto_palette.as_ref().map(|auto| AutoPalette {
        method: defaults.extraction(auto.method.as_deref()),
        size: auto.size.unwrap_or(defaults.palette_size),
    });
    let worker = state.worker.clone();
    let work = async move {
        match auto {
            Some(auto) => worker.run_with_auto_palette(request, auto).await,
            None => worker.run(request).await,
        }
    };
    run_job(&state, &req.job, job_id, work).await.and_then(image_response)
}

/// Extract a palette from an image
#[utoipa::path(
    post,
    path = "/api/palette",
    request_body = PaletteRequest,
    responses(
        (status = 200, description = "Extracted palette", body = PaletteResponse),
        (status = 400, description = "Malformed request or image too large"),
        (status = 409, description = "Superseded by a newer job on the same channel"),
        (status = 422, description = "Image rejected by the engine"),
    ),
    tag = "Transform"
)]
pub async fn handle_palette(
    State(state): State<AppState>,
    Json(req): Json<PaletteRequest>,
) -> Result<Json<PaletteResponse>, ApiError> {
    let pixels = decode_image(&state, &req.image)?;
    let defaults = &state.config.defaults;
    let method = defaults.extraction(req.method.as_deref());
    let size = req.size.unwrap_or(defaults.palette_size);
    let sample_cap = req.sample_cap.unwrap_or(defaults.sample_cap);
    let job_id = begin_job(&state, &req.job).await?;

    let request = TransformRequest::new(
        job_id,
        Operation::ExtractPalette,
        req.image.width,
        req.image.height,
        pixels,
    )
    .with_dither(DitherSpec::default().seed(req.seed))
    .with_extraction(method, size)
    .with_sample_cap(sample_cap);

    let worker = state.worker.clone();
    let work = async move { worker.run(request).await };
    match run_job(&state, &req.job, job_id, work).await? {
        TransformResponse::Palette { job_id, colors } => {
            Ok(Json(PaletteResponse { job_id, colors }))
        }
        other => Err(ApiError::Internal(format!(
            "unexpected response for job {}",
            other.job_id()
        ))),
    }
}

/// Enforce the size limits and decode the pixel payload.
fn decode_image(state: &AppState, image: &ImageData) -> Result<Vec<u8>, ApiError> {
    let limits = &state.config.limits;
    if !limits.admits(image.width, image.height) {
        return Err(ApiError::TooLarge {
            width: image.width,
            height: image.height,
            max_width: limits.max_width,
            max_height: limits.max_height,
        });
    }
    Ok(STANDARD.decode(image.pixels.as_bytes())?)
}

fn dither_spec(state: &AppState, params: &DitherParams) -> DitherSpec {
    state.config.defaults.dither_spec(
        params.method.as_deref(),
        params.threshold,
        params.factor,
        params.stretch,
        params.seed,
    )
}

fn parse_palette(colors: &[PaletteColor]) -> Result<Vec<PaletteEntry>, ApiError> {
    colors
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<PaletteEntry, ApiError> {
            let color: Rgb = entry
                .color
                .parse()
                .map_err(|source| dither_core::PaletteError::ParseColor { index, source })?;
            Ok(PaletteEntry::new(color, entry.threshold.unwrap_or(1.0)))
        })
        .collect()
}

/// Assign the job id and mark it as the latest on its channel.
async fn begin_job(state: &AppState, job: &JobParams) -> Result<u64, ApiError> {
    let job_id = job.job_id.unwrap_or_else(|| state.worker.next_job_id());
    if let Some(channel) = &job.channel {
        if !state.tracker.issue(channel, job_id).await {
            tracing::debug!(job_id, channel = %channel, "Refusing job older than the latest");
            return Err(ApiError::Superseded(job_id));
        }
    }
    Ok(job_id)
}

/// Run a job, release its channel, drop stale results and surface engine
/// failures.
///
/// The work runs on its own task so the channel is released even when the
/// client goes away mid-request.
async fn run_job<F>(
    state: &AppState,
    job: &JobParams,
    job_id: u64,
    work: F,
) -> Result<TransformResponse, ApiError>
where
    F: Future<Output = TransformResponse> + Send + 'static,
{
    let tracker = state.tracker.clone();
    let channel = job.channel.clone();
    let task = tokio::spawn(async move {
        let response = work.await;
        let current = match &channel {
            Some(channel) => {
                let current = tracker.is_current(channel, job_id).await;
                tracker.complete(channel).await;
                current
            }
            None => true,
        };
        (response, current)
    });

    let (response, current) = task
        .await
        .map_err(|e| ApiError::Internal(format!("job {job_id} task failed: {e}")))?;
    if !current {
        tracing::debug!(job_id, channel = ?job.channel, "Discarding superseded result");
        return Err(ApiError::Superseded(job_id));
    }

    match response {
        TransformResponse::Failed { message, .. } => Err(ApiError::Rejected(message)),
        other => Ok(other),
    }
}

fn image_response(response: TransformResponse) -> Result<Json<ImageResponse>, ApiError> {
    match response {
        TransformResponse::Image {
            job_id,
            buffer,
            histogram,
        } => Ok(Json(ImageResponse {
            job_id,
            width: buffer.width(),
            height: buffer.height(),
            pixels: STANDARD.encode(buffer.as_bytes()),
            histogram: histogram.to_hex_map(),
        })),
        other => Err(ApiError::Internal(format!(
            "unexpected response for job {}",
            other.job_id()
        ))),
    }
}
