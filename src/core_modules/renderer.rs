// THEORY:
// The view renderer turns the analysis planes into one of four diagnostic
// pictures. It is a selector, not a state machine: each invocation picks a mode
// and recomputes every output pixel from scratch.
//
// - `Original`: the decoded image, untouched.
// - `Mask`: black below the threshold; above it, a gray ramp from 60 to 255
//   over the remaining score range, bent by a 1.2 exponent so only the
//   strongest grooves reach white.
// - `Sketch`: white paper with dark ink where edges are strong. Ink rises from
//   0 at gradient 10 to full at gradient 90, with a 0.6 exponent that lifts
//   faint edges.
// - `Overlay`: the original dimmed to 30%, with the same ink added as cyan,
//   turning white for the strongest quarter of edges.
//
// Every output pixel depends only on its own inputs, so rows are rendered in
// parallel. Alpha is always forced to 255.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::core_modules::pixel_buffer::{OutputBuffer, PixelBuffer};
use crate::core_modules::plane::plane::{GradientBuffer, LumaBuffer};
use crate::core_modules::threshold::groove_score;
use crate::error::Result;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MASK_FLOOR: f32 = 60.0;
const MASK_GAMMA: f32 = 1.2;
const INK_START: f32 = 10.0;
const INK_RANGE: f32 = 80.0;
const INK_GAMMA: f32 = 0.6;
const OVERLAY_DIM: f32 = 0.3;
const OVERLAY_MIN_INK: f32 = 10.0;
const WHITE_BOOST_START: f32 = 0.75;

/// Which picture the renderer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Original,
    Overlay,
    Sketch,
    Mask,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Original,
        ViewMode::Overlay,
        ViewMode::Sketch,
        ViewMode::Mask,
    ];

    /// Whether this mode runs the analysis (everything except `Original`).
    pub fn is_analytic(self) -> bool {
        self != ViewMode::Original
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Original => "original",
            ViewMode::Overlay => "overlay",
            ViewMode::Sketch => "sketch",
            ViewMode::Mask => "mask",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown view mode `{0}` (expected original, overlay, sketch or mask)")]
pub struct ParseViewModeError(pub String);

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(ViewMode::Original),
            "overlay" => Ok(ViewMode::Overlay),
            "sketch" => Ok(ViewMode::Sketch),
            "mask" => Ok(ViewMode::Mask),
            _ => Err(ParseViewModeError(s.to_string())),
        }
    }
}

/// Everything the renderer reads. All planes share the image's dimensions.
pub struct RenderInputs<'a> {
    pub pixels: &'a PixelBuffer,
    pub luma: &'a LumaBuffer,
    pub gradient: &'a GradientBuffer,
    pub threshold: f32,
    /// Ceiling used to normalise mask intensities (the histogram's `max_score_bucket`).
    pub max_observed_score: f32,
    pub gradient_weight: f32,
}

/// Edge ink in [0, 255] for a gradient magnitude. Shared by sketch and overlay.
#[inline]
pub fn edge_ink(gradient: f32) -> f32 {
    if gradient < INK_START {
        return 0.0;
    }
    let t = ((gradient - INK_START) / INK_RANGE).clamp(0.0, 1.0);
    255.0 * t.powf(INK_GAMMA)
}

/// Mask-mode pixel for one groove score.
pub fn mask_pixel(score: f32, threshold: f32, max_observed_score: f32) -> Pixel {
    if score <= threshold {
        return Pixel::new(0, 0, 0, 255);
    }
    let span = (max_observed_score - threshold).max(1.0);
    let normalized = ((score - threshold) / span).clamp(0.0, 1.0);
    let value = MASK_FLOOR + (255.0 - MASK_FLOOR) * normalized.powf(MASK_GAMMA);
    Pixel::gray(to_channel(value))
}

/// Sketch-mode pixel: dark ink on white paper.
pub fn sketch_pixel(gradient: f32) -> Pixel {
    Pixel::gray(to_channel(255.0 - edge_ink(gradient)))
}

/// Overlay-mode pixel: dimmed original plus cyan-to-white edge highlight.
pub fn overlay_pixel(original: Pixel, gradient: f32) -> Pixel {
    let mut r = original.red as f32 * OVERLAY_DIM;
    let mut g = original.green as f32 * OVERLAY_DIM;
    let mut b = original.blue as f32 * OVERLAY_DIM;

    let ink = edge_ink(gradient);
    if ink > OVERLAY_MIN_INK {
        let alpha = ink / 255.0;
        g += 255.0 * alpha;
        b += 255.0 * alpha;
        if alpha > WHITE_BOOST_START {
            let boost = 255.0 * (alpha - WHITE_BOOST_START) / (1.0 - WHITE_BOOST_START);
            r += boost;
            g += boost;
            b += boost;
        }
    }

    Pixel::new(to_channel(r), to_channel(g), to_channel(b), 255)
}

/// Renders `mode` into a fresh output buffer.
pub fn render(mode: ViewMode, inputs: &RenderInputs<'_>) -> Result<OutputBuffer> {
    if mode == ViewMode::Original {
        return Ok(inputs.pixels.clone());
    }

    let mut data = inputs.pixels.as_bytes().to_vec();
    data.par_chunks_mut(CHANNELS)
        .enumerate()
        .for_each(|(i, out)| {
            let gradient = inputs.gradient.data[i];
            let pixel = match mode {
                ViewMode::Mask => {
                    let score = groove_score(inputs.luma.data[i], gradient, inputs.gradient_weight);
                    mask_pixel(score, inputs.threshold, inputs.max_observed_score)
                }
                ViewMode::Sketch => sketch_pixel(gradient),
                ViewMode::Overlay => overlay_pixel(inputs.pixels.pixel(i), gradient),
                ViewMode::Original => inputs.pixels.pixel(i),
            };
            let bytes: [u8; CHANNELS] = pixel.into();
            out.copy_from_slice(&bytes);
        });

    PixelBuffer::new(inputs.pixels.width(), inputs.pixels.height(), data)
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
