// THEORY:
// Every stage of the texture pipeline is a total function over a well-formed
// image, so the error surface is deliberately small. Failures can only happen at
// the edges of the engine: an image that cannot be decoded, a buffer whose length
// disagrees with its declared dimensions, a malformed configuration, or an async
// worker that never reported back. Numeric degeneracies (empty masks, zero
// foreground, singular regressions) are NOT errors; they resolve to documented
// fallback values inside the stage that meets them.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source image could not be read or decoded. The pipeline never starts.
    #[error("image {path:?} is unavailable: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Width or height is zero.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The RGBA byte count does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// The background worker was cancelled or panicked before producing a result.
    #[error("analysis worker failed: {0}")]
    Worker(String),

    #[error("failed to write {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
