// THEORY:
// The adaptive thresholder picks ONE scalar per image that separates groove-like
// pixels from the rest, without any fixed notion of "dark" or "sharp".
//
// 1.  **Groove Score**: every pixel gets `(255 - luma) + w * gradient`. Dark
//     pixels and strong edges both push the score up; grooves on a shell are
//     typically both.
// 2.  **Histogram**: scores are floored into 1000 unit-wide buckets (clamped to
//     [0, 999]). The highest bucket ever touched is remembered as the
//     `max_score_bucket`; it is the observed ceiling, not the mode.
// 3.  **Top-Down Walk**: starting from that ceiling, bucket counts are
//     accumulated downward until they exceed the target share of all pixels
//     (a quarter by default). That bucket index is the threshold.
// 4.  **Floor**: the threshold never drops below a minimum (40 by default) so
//     blank or washed-out images do not mark everything as groove.
//
// The histogram is built fresh per call. Nothing is cached between images.

use crate::core_modules::plane::plane::{GradientBuffer, LumaBuffer};
use tracing::debug;

pub const HISTOGRAM_BUCKETS: usize = 1000;

/// Composite darkness + edge-strength metric for one pixel.
#[inline]
pub fn groove_score(luma: f32, gradient: f32, gradient_weight: f32) -> f32 {
    (255.0 - luma) + gradient_weight * gradient
}

/// Bucket index of a score: `floor(score)` clamped to the histogram range.
#[inline]
pub fn score_bucket(score: f32) -> usize {
    let floored = score.floor();
    if floored <= 0.0 {
        0
    } else {
        (floored as usize).min(HISTOGRAM_BUCKETS - 1)
    }
}

/// Fixed-width histogram of groove scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Pixel count per unit-wide score bucket.
    pub buckets: Box<[u32; HISTOGRAM_BUCKETS]>,
    /// Number of pixels added.
    pub total: u64,
    /// Largest bucket index that received any pixel.
    pub max_score_bucket: usize,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            buckets: Box::new([0; HISTOGRAM_BUCKETS]),
            total: 0,
            max_score_bucket: 0,
        }
    }

    /// Builds the groove-score histogram of a whole image.
    pub fn from_planes(luma: &LumaBuffer, gradient: &GradientBuffer, gradient_weight: f32) -> Self {
        let mut histogram = Self::new();
        for (&l, &g) in luma.data.iter().zip(gradient.data.iter()) {
            histogram.add(groove_score(l, g, gradient_weight));
        }
        histogram
    }

    pub fn add(&mut self, score: f32) {
        let bucket = score_bucket(score);
        self.buckets[bucket] += 1;
        self.total += 1;
        if bucket > self.max_score_bucket {
            self.max_score_bucket = bucket;
        }
    }

    /// Walks buckets from the ceiling down and returns the first index at which
    /// the running count exceeds `quantile * total`. `None` for an empty histogram.
    pub fn top_down_cut(&self, quantile: f32) -> Option<usize> {
        let target = quantile as f64 * self.total as f64;
        let mut accumulated = 0u64;
        for bucket in (0..=self.max_score_bucket).rev() {
            accumulated += self.buckets[bucket] as u64;
            if accumulated as f64 > target {
                return Some(bucket);
            }
        }
        None
    }
}

/// The per-image groove threshold, never below `min_threshold`.
pub fn dynamic_threshold(histogram: &Histogram, quantile: f32, min_threshold: f32) -> f32 {
    let cut = histogram.top_down_cut(quantile).unwrap_or(0) as f32;
    let threshold = cut.max(min_threshold);
    debug!(
        cut,
        threshold,
        max_score_bucket = histogram.max_score_bucket,
        "selected groove threshold"
    );
    threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::plane::plane::Plane;

    #[test]
    fn score_combines_darkness_and_edges() {
        assert_eq!(groove_score(255.0, 0.0, 3.0), 0.0);
        assert_eq!(groove_score(0.0, 0.0, 3.0), 255.0);
        assert_eq!(groove_score(200.0, 10.0, 3.0), 85.0);
    }

    #[test]
    fn buckets_are_floored_and_clamped() {
        assert_eq!(score_bucket(-0.5), 0);
        assert_eq!(score_bucket(12.99), 12);
        assert_eq!(score_bucket(999.5), 999);
        assert_eq!(score_bucket(4321.0), 999);
    }

    #[test]
    fn tracks_highest_touched_bucket() {
        let mut histogram = Histogram::new();
        for score in [3.0, 700.2, 12.0, 12.5] {
            histogram.add(score);
        }
        assert_eq!(histogram.max_score_bucket, 700);
        assert_eq!(histogram.buckets[12], 2);
        assert_eq!(histogram.total, 4);
    }

    #[test]
    fn cut_isolates_top_quartile() {
        let mut histogram = Histogram::new();
        // 8 pixels: scores 100..=107, one each. Target = 2, exceeded at the 3rd bucket from the top.
        for score in 100..108 {
            histogram.add(score as f32);
        }
        assert_eq!(histogram.top_down_cut(0.25), Some(105));
    }

    #[test]
    fn single_bucket_image_cuts_at_that_bucket() {
        let mut histogram = Histogram::new();
        for _ in 0..16 {
            histogram.add(255.0);
        }
        assert_eq!(histogram.max_score_bucket, 255);
        assert_eq!(dynamic_threshold(&histogram, 0.25, 40.0), 255.0);
    }

    #[test]
    fn threshold_is_floored() {
        let mut histogram = Histogram::new();
        for _ in 0..10 {
            histogram.add(25.0);
        }
        assert_eq!(dynamic_threshold(&histogram, 0.25, 40.0), 40.0);
    }

    #[test]
    fn empty_histogram_falls_back_to_floor() {
        assert_eq!(dynamic_threshold(&Histogram::new(), 0.25, 40.0), 40.0);
    }

    #[test]
    fn builds_from_planes() {
        let luma = Plane::from_vec(2, 1, vec![255.0, 0.0]);
        let mut gradient = Plane::new(2, 1);
        gradient.set(0, 0, 100.0);
        let histogram = Histogram::from_planes(&luma, &gradient, 3.0);
        assert_eq!(histogram.buckets[300], 1);
        assert_eq!(histogram.buckets[255], 1);
        assert_eq!(histogram.max_score_bucket, 300);
    }
}
