// THEORY:
// The groove mask is the binary outcome of the threshold: a pixel is groove iff
// its score is strictly above the image's threshold. Alongside it, a coarse
// foreground test (`luma > 15` by default) separates the specimen from a dark
// backdrop. The two criteria are independent, so on unusual images the groove
// density (groove pixels / foreground pixels) can exceed 1.0; it is reported as
// is. With no foreground at all the density is 0.

use crate::core_modules::plane::plane::{GradientBuffer, LumaBuffer};
use crate::core_modules::threshold::groove_score;

/// Binary per-pixel groove classification, one byte (0 or 1) per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrooveMask {
    pub width: usize,
    pub height: usize,
    pub bits: Vec<u8>,
    /// Number of pixels set to 1.
    pub active: usize,
}

impl GrooveMask {
    /// An all-zero mask.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![0; width * height],
            active: 0,
        }
    }

    /// Builds a mask from explicit bits; any non-zero byte counts as set.
    pub fn from_bits(width: usize, height: usize, bits: Vec<u8>) -> Self {
        debug_assert_eq!(bits.len(), width * height);
        let bits: Vec<u8> = bits.into_iter().map(|b| (b != 0) as u8).collect();
        let active = bits.iter().filter(|&&b| b == 1).count();
        Self {
            width,
            height,
            bits,
            active,
        }
    }

    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x] == 1
    }
}

/// Mask plus the counts needed for the density metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSummary {
    pub mask: GrooveMask,
    pub foreground: usize,
    pub groove_density: f64,
}

/// Marks groove pixels and measures their share of the foreground.
pub fn build_mask(
    luma: &LumaBuffer,
    gradient: &GradientBuffer,
    threshold: f32,
    gradient_weight: f32,
    foreground_luma: f32,
) -> MaskSummary {
    let mut mask = GrooveMask::empty(luma.width, luma.height);
    let mut foreground = 0usize;

    for (i, (&l, &g)) in luma.data.iter().zip(gradient.data.iter()).enumerate() {
        if groove_score(l, g, gradient_weight) > threshold {
            mask.bits[i] = 1;
            mask.active += 1;
        }
        if l > foreground_luma {
            foreground += 1;
        }
    }

    MaskSummary {
        groove_density: groove_density(mask.active, foreground),
        mask,
        foreground,
    }
}

/// `groove / foreground`, or 0 when there is no foreground.
pub fn groove_density(groove: usize, foreground: usize) -> f64 {
    if foreground == 0 {
        0.0
    } else {
        groove as f64 / foreground as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::plane::plane::Plane;

    #[test]
    fn strict_threshold_comparison() {
        // Scores: 255 - 215 = 40 (not above 40), 255 - 214 = 41 (above).
        let luma = Plane::from_vec(2, 1, vec![215.0, 214.0]);
        let gradient = Plane::new(2, 1);
        let summary = build_mask(&luma, &gradient, 40.0, 3.0, 15.0);
        assert_eq!(summary.mask.bits, vec![0, 1]);
        assert_eq!(summary.foreground, 2);
        assert_eq!(summary.groove_density, 0.5);
    }

    #[test]
    fn black_image_has_zero_density() {
        let luma = Plane::new(4, 4);
        let gradient = Plane::new(4, 4);
        let summary = build_mask(&luma, &gradient, 255.0, 3.0, 15.0);
        assert_eq!(summary.foreground, 0);
        assert_eq!(summary.mask.active, 0);
        assert_eq!(summary.groove_density, 0.0);
    }

    #[test]
    fn density_can_exceed_one() {
        // Three dark pixels are groove but only one pixel counts as foreground.
        let luma = Plane::from_vec(3, 1, vec![10.0, 10.0, 16.0]);
        let gradient = Plane::new(3, 1);
        let summary = build_mask(&luma, &gradient, 40.0, 3.0, 15.0);
        assert_eq!(summary.mask.active, 3);
        assert_eq!(summary.foreground, 1);
        assert_eq!(summary.groove_density, 3.0);
    }

    #[test]
    fn edges_push_bright_pixels_into_mask() {
        let luma = Plane::from_vec(2, 1, vec![250.0, 250.0]);
        let mut gradient = Plane::new(2, 1);
        gradient.set(1, 0, 20.0);
        let summary = build_mask(&luma, &gradient, 40.0, 3.0, 15.0);
        assert!(!summary.mask.is_set(0, 0));
        assert!(summary.mask.is_set(1, 0));
    }

    #[test]
    fn from_bits_normalises_values() {
        let mask = GrooveMask::from_bits(2, 2, vec![0, 7, 1, 0]);
        assert_eq!(mask.bits, vec![0, 1, 1, 0]);
        assert_eq!(mask.active, 2);
    }
}
