// THEORY:
// Box-counting estimate of how much the groove pattern fills the plane.
//
// For each box size `s` the image is tiled with an s x s grid anchored at the
// top-left corner (the last row/column of boxes is truncated by the image edge)
// and every box containing at least one groove pixel is counted. For a
// self-similar pattern, `count ~ (1/s)^D`, so the dimension D is the slope of
// the least-squares line through `(ln(1/s), ln(count))`.
//
// Scales with no occupied box are dropped. Fewer than two usable scales, or a
// singular regression (all usable scales equal), falls back to a dimension of
// 1.0. The slope is reported unclamped.

use crate::core_modules::groove_mask::GrooveMask;
use tracing::debug;

pub const DEFAULT_BOX_SCALES: [usize; 6] = [2, 4, 8, 16, 32, 64];

/// Dimension reported when the regression cannot be formed.
pub const DEGENERATE_DIMENSION: f64 = 1.0;

/// Number of `scale x scale` boxes containing at least one set mask pixel.
pub fn count_occupied_boxes(mask: &GrooveMask, scale: usize) -> usize {
    if scale == 0 || mask.active == 0 {
        return 0;
    }
    let boxes_x = mask.width.div_ceil(scale);
    let boxes_y = mask.height.div_ceil(scale);
    let mut occupied = vec![false; boxes_x * boxes_y];
    let mut count = 0;

    for y in 0..mask.height {
        let box_row = (y / scale) * boxes_x;
        for x in 0..mask.width {
            if mask.is_set(x, y) {
                let slot = &mut occupied[box_row + x / scale];
                if !*slot {
                    *slot = true;
                    count += 1;
                }
            }
        }
    }

    count
}

/// `(scale, count)` pairs for every scale with at least one occupied box.
pub fn box_counts(mask: &GrooveMask, scales: &[usize]) -> Vec<(usize, usize)> {
    scales
        .iter()
        .map(|&scale| (scale, count_occupied_boxes(mask, scale)))
        .filter(|&(_, count)| count > 0)
        .collect()
}

/// Ordinary least-squares slope of `y` against `x`. `None` when the x values
/// have no spread or fewer than two points are given.
pub fn least_squares_slope(points: &[(f64, f64)]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < 1e-9 {
        return None;
    }
    Some((n * sum_xy - sum_x * sum_y) / denominator)
}

/// Box-counting fractal dimension of the groove mask.
pub fn fractal_dimension(mask: &GrooveMask, scales: &[usize]) -> f64 {
    let counts = box_counts(mask, scales);
    let points: Vec<(f64, f64)> = counts
        .iter()
        .map(|&(scale, count)| ((1.0 / scale as f64).ln(), (count as f64).ln()))
        .collect();

    match least_squares_slope(&points) {
        Some(slope) => {
            debug!(scales = counts.len(), slope, "box-counting regression");
            slope
        }
        None => {
            debug!(scales = counts.len(), "degenerate box-counting regression");
            DEGENERATE_DIMENSION
        }
    }
}
