// THEORY:
// The `pipeline` module is the top-level API of the texture engine. It runs the
// full stack on one image and hands back the rendered view plus the measured
// phenotype:
//
//   pixels -> luma -> smoothed -> gradient -> { threshold -> mask -> fractal, view }
//
// Data flows strictly forward and every buffer is created and dropped within a
// single call. Nothing survives between calls: two runs over the same image and
// mode produce identical output (apart from the measured processing time).
// In `Original` mode the image is returned untouched and no metrics are produced.

use crate::core_modules::fractal::{DEFAULT_BOX_SCALES, fractal_dimension};
use crate::core_modules::gradient::gradient_magnitude;
use crate::core_modules::grayscale::to_luma;
use crate::core_modules::groove_mask::{GrooveMask, build_mask};
use crate::core_modules::pixel_buffer::{OutputBuffer, PixelBuffer};
use crate::core_modules::plane::plane::{GradientBuffer, LumaBuffer};
use crate::core_modules::renderer::{RenderInputs, render};
use crate::core_modules::smoothing::smooth;
use crate::core_modules::threshold::{Histogram, dynamic_threshold};
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

// Re-export key data structures for the public API.
pub use crate::core_modules::renderer::ViewMode;

/// Placeholder reported for the fragment count; blobs are not counted.
pub const FRAGMENTATION_PLACEHOLDER: u32 = 0;

/// Configuration for the TexturePipeline, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of 3x3 smoothing passes applied before gradients are taken.
    pub smoothing_passes: usize,
    /// Weight of edge strength in the groove score.
    pub gradient_weight: f32,
    /// Share of all pixels the threshold aims to keep, counted from the top score down.
    /// A value of 0.25 isolates roughly the top quartile.
    pub groove_quantile: f32,
    /// Lowest threshold the adaptive selection may return.
    pub min_threshold: f32,
    /// Pixels with luma above this count as specimen rather than backdrop.
    pub foreground_luma: f32,
    /// Box sizes (in pixels) used by the box-counting estimator.
    pub box_scales: Vec<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoothing_passes: 1,
            gradient_weight: 3.0,
            groove_quantile: 0.25,
            min_threshold: 40.0,
            foreground_luma: 15.0,
            box_scales: DEFAULT_BOX_SCALES.to_vec(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_passes == 0 {
            return Err(AnalysisError::InvalidConfig(
                "smoothing_passes must be at least 1".into(),
            ));
        }
        if !(self.groove_quantile > 0.0 && self.groove_quantile <= 1.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "groove_quantile must be in (0, 1], got {}",
                self.groove_quantile
            )));
        }
        if !self.gradient_weight.is_finite() || !self.min_threshold.is_finite() {
            return Err(AnalysisError::InvalidConfig(
                "gradient_weight and min_threshold must be finite".into(),
            ));
        }
        if self.box_scales.is_empty() || self.box_scales.contains(&0) {
            return Err(AnalysisError::InvalidConfig(
                "box_scales must be non-empty and contain no zero".into(),
            ));
        }
        Ok(())
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// The measured surface-texture phenotype of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenotypicData {
    /// Groove pixels per foreground pixel. 0 when there is no foreground.
    pub groove_density: f64,
    /// Box-counting dimension of the groove mask.
    pub fractal_dimension: f64,
    /// Always 0: fragment counting is not implemented.
    pub fragmentation_count: u32,
    /// Wall-clock time of smoothing through rendering, in milliseconds.
    pub processing_time_ms: f64,
}

/// Intermediate products of one analysis run.
#[derive(Debug, Clone)]
pub struct GrooveAnalysis {
    pub luma: LumaBuffer,
    pub gradient: GradientBuffer,
    pub histogram: Histogram,
    pub threshold: f32,
    pub mask: GrooveMask,
    pub foreground: usize,
    pub groove_density: f64,
    pub fractal_dimension: f64,
}

impl GrooveAnalysis {
    /// Runs stages 2 to 6 on an existing luma plane.
    pub fn from_luma(luma: LumaBuffer, config: &PipelineConfig) -> Self {
        // Stage 2: Smoothing
        let smoothed = smooth(&luma, config.smoothing_passes);

        // Stage 3: Edge Strength
        let gradient = gradient_magnitude(&smoothed);

        // Stage 4: Adaptive Threshold
        let histogram = Histogram::from_planes(&luma, &gradient, config.gradient_weight);
        let threshold =
            dynamic_threshold(&histogram, config.groove_quantile, config.min_threshold);

        // Stage 5: Groove Mask & Density
        let summary = build_mask(
            &luma,
            &gradient,
            threshold,
            config.gradient_weight,
            config.foreground_luma,
        );
        debug!(
            groove = summary.mask.active,
            foreground = summary.foreground,
            density = summary.groove_density,
            "groove mask built"
        );

        // Stage 6: Fractal Dimension
        let fractal_dimension = fractal_dimension(&summary.mask, &config.box_scales);

        Self {
            luma,
            gradient,
            threshold,
            mask: summary.mask,
            foreground: summary.foreground,
            groove_density: summary.groove_density,
            fractal_dimension,
            histogram,
        }
    }

    /// Stage 7: renders the requested view from this run's planes.
    pub fn render(
        &self,
        pixels: &PixelBuffer,
        mode: ViewMode,
        config: &PipelineConfig,
    ) -> Result<OutputBuffer> {
        let inputs = RenderInputs {
            pixels,
            luma: &self.luma,
            gradient: &self.gradient,
            threshold: self.threshold,
            max_observed_score: self.histogram.max_score_bucket as f32,
            gradient_weight: config.gradient_weight,
        };
        render(mode, &inputs)
    }
}

/// The primary output of the pipeline for a single image.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub mode: ViewMode,
    pub output: OutputBuffer,
    /// `None` in `Original` mode.
    pub data: Option<PhenotypicData>,
    /// The groove threshold used, `None` in `Original` mode.
    pub threshold: Option<f32>,
}

/// The main, top-level struct for the texture engine.
#[derive(Debug, Clone, Default)]
pub struct TexturePipeline {
    config: PipelineConfig,
}

impl TexturePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyzes one image and renders it in `mode`.
    pub fn analyze(&self, pixels: &PixelBuffer, mode: ViewMode) -> Result<Analysis> {
        if !mode.is_analytic() {
            return Ok(Analysis {
                mode,
                output: pixels.clone(),
                data: None,
                threshold: None,
            });
        }

        // Stage 1: Grayscale
        let luma = to_luma(pixels);

        let started = Instant::now();
        let analysis = GrooveAnalysis::from_luma(luma, &self.config);
        let output = analysis.render(pixels, mode, &self.config)?;
        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let data = PhenotypicData {
            groove_density: analysis.groove_density,
            fractal_dimension: analysis.fractal_dimension,
            fragmentation_count: FRAGMENTATION_PLACEHOLDER,
            processing_time_ms,
        };
        info!(
            width = pixels.width(),
            height = pixels.height(),
            %mode,
            threshold = analysis.threshold,
            groove_density = data.groove_density,
            fractal_dimension = data.fractal_dimension,
            processing_time_ms,
            "texture analysis complete"
        );

        Ok(Analysis {
            mode,
            output,
            data: Some(data),
            threshold: Some(analysis.threshold),
        })
    }
}

/// Convenience entry point using a validated configuration.
pub fn analyze(pixels: &PixelBuffer, mode: ViewMode, config: &PipelineConfig) -> Result<Analysis> {
    TexturePipeline::new(config.clone())?.analyze(pixels, mode)
}
