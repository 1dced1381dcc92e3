// THEORY:
// This file is the main entry point for the `groove_vision` library crate.
// It exports the `TexturePipeline` and its associated data structures
// (`PipelineConfig`, `PhenotypicData`, `Analysis`, `ViewMode`) as the
// high-level interface of the texture engine, plus the async `AnalysisSession`
// for interactive hosts. The per-stage building blocks live in `core_modules`
// and stay public so hosts and tests can inspect intermediate planes.

pub mod core_modules;
pub mod error;
pub mod pipeline;
pub mod session;

pub use crate::core_modules::pixel_buffer::{OutputBuffer, PixelBuffer};
pub use crate::core_modules::utils::image_helper::image_helper;
pub use crate::error::{AnalysisError, Result};
pub use crate::pipeline::{
    Analysis, GrooveAnalysis, PhenotypicData, PipelineConfig, TexturePipeline, ViewMode, analyze,
};
pub use crate::session::AnalysisSession;
