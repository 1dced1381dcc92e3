use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::plane::plane::{LumaBuffer, Plane};
use rayon::prelude::*;

/// Converts an RGBA buffer into a single-channel luma plane (0.299R + 0.587G + 0.114B).
pub fn to_luma(pixels: &PixelBuffer) -> LumaBuffer {
    let data: Vec<f32> = pixels
        .as_bytes()
        .par_chunks_exact(CHANNELS)
        .map(|bytes| Pixel::from(bytes).luma())
        .collect();
    Plane::from_vec(pixels.width() as usize, pixels.height() as usize, data)
}
