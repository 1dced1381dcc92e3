// THEORY:
// `AnalysisSession` is the asynchronous face of the pipeline for interactive
// hosts. A host submits an image, yields once so it can show a "processing"
// indicator, and awaits the result.
//
// Key principles:
// 1.  **Atomic Runs**: each submission runs the entire pipeline as one
//     non-cancelable unit on tokio's blocking pool. It either returns a complete
//     `Analysis` or an error; partial results are never exposed.
// 2.  **Private Buffers**: every run owns its own buffers, so no locking is
//     needed between concurrent runs.
// 3.  **Latest Wins**: every submission takes a new generation number. When a
//     run finishes after a newer submission has started, its result is stale and
//     is discarded (`Ok(None)`) instead of being handed to the host.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{AnalysisError, Result};
use crate::pipeline::{Analysis, PipelineConfig, TexturePipeline, ViewMode};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pipeline: Arc<TexturePipeline>,
    generation: Arc<AtomicU64>,
}

impl AnalysisSession {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            pipeline: Arc::new(TexturePipeline::new(config)?),
            generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Generation number of the most recent submission.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Analyzes `pixels` in the background. Returns `Ok(None)` when a newer
    /// submission superseded this one while it was running.
    pub async fn submit(&self, pixels: PixelBuffer, mode: ViewMode) -> Result<Option<Analysis>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Let the host render its busy state before the heavy work starts.
        tokio::task::yield_now().await;

        let pipeline = Arc::clone(&self.pipeline);
        let analysis = tokio::task::spawn_blocking(move || pipeline.analyze(&pixels, mode))
            .await
            .map_err(|e| AnalysisError::Worker(e.to_string()))??;

        let latest = self.current_generation();
        if latest != generation {
            debug!(generation, latest, "discarding superseded analysis");
            return Ok(None);
        }
        Ok(Some(analysis))
    }
}
