//! Off-runtime execution of engine requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dither_core::{
    ExtractionMethod, Operation, PaletteEntry, Rgb, TransformRequest, TransformResponse,
};
use tokio::sync::Semaphore;

/// Palette to derive from the image itself before quantizing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPalette {
    pub method: ExtractionMethod,
    pub size: usize,
}

/// Runs transforms on tokio's blocking pool.
///
/// Every transform is CPU-bound, so it is moved off the async runtime with
/// `spawn_blocking`. A semaphore caps how many run at once; excess requests
/// wait for a permit.
pub struct TransformWorker {
    permits: Arc<Semaphore>,
    next_job: AtomicU64,
}

impl TransformWorker {
    pub fn new(max_concurrent_jobs: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
            next_job: AtomicU64::new(1),
        }
    }

    /// Allocate a fresh job id for requests that arrive without one.
    pub fn next_job_id(&self) -> u64 {
        self.next_job.fetch_add(1, Ordering::Relaxed)
    }

    /// Permits currently free
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    /// Execute one request to completion.
    ///
    /// A job that panics or cannot be scheduled comes back as
    /// [`TransformResponse::Failed`].
    pub async fn run(&self, request: TransformRequest) -> TransformResponse {
        let job_id = request.job_id;
        let operation = request.operation;

        let permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!(job_id, error = %e, "Worker pool closed");
                return TransformResponse::Failed {
                    job_id,
                    message: format!("worker unavailable: {e}"),
                };
            }
        };

        let started = Instant::now();
        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            dither_core::process(request)
        })
        .await;

        match result {
            Ok(response) => {
                tracing::info!(
                    job_id,
                    operation = operation.name(),
                    failed = response.is_failed(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Transform completed"
                );
                response
            }
            Err(e) => {
                tracing::error!(
                    job_id,
                    operation = operation.name(),
                    error = %e,
                    "Transform task failed"
                );
                TransformResponse::Failed {
                    job_id,
                    message: format!("transform task failed: {e}"),
                }
            }
        }
    }

    /// Quantize against a palette extracted from the same image.
    ///
    /// Extraction runs as its own job and must finish before quantization
    /// starts; its colors replace whatever palette `request` carried.
    pub async fn run_with_auto_palette(
        &self,
        request: TransformRequest,
        auto: AutoPalette,
    ) -> TransformResponse {
        let job_id = request.job_id;

        let extraction = TransformRequest::new(
            job_id,
            Operation::ExtractPalette,
            request.width,
            request.height,
            request.pixels.clone(),
        )
        .with_dither(request.dither)
        .with_extraction(auto.method, auto.size)
        .with_sample_cap(request.sample_cap);

        let colors = match self.run(extraction).await {
            TransformResponse::Palette { colors, .. } => colors,
            TransformResponse::Failed { message, .. } => {
                return TransformResponse::Failed { job_id, message };
            }
            TransformResponse::Image { .. } => {
                return TransformResponse::Failed {
                    job_id,
                    message: "palette extraction returned an image".to_string(),
                };
            }
        };

        let palette = match colors
            .iter()
            .map(|hex| hex.parse::<Rgb>().map(PaletteEntry::opaque))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(palette) => palette,
            Err(e) => {
                return TransformResponse::Failed {
                    job_id,
                    message: e.to_string(),
                };
            }
        };

        tracing::debug!(
            job_id,
            method = auto.method.name(),
            colors = palette.len(),
            "Extracted palette for quantization"
        );

        let mut request = request.with_palette(palette);
        request.operation = Operation::Quantize;
        self.run(request).await
    }
}

impl Default for TransformWorker {
    fn default() -> Self {
        Self::new(1)
    }
}
