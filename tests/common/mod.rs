//! Synthetic test images.
#![allow(dead_code)]

use groove_vision::PixelBuffer;
use groove_vision::core_modules::pixel::pixel::Pixel;

pub fn flat_gray(width: u32, height: u32, value: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, Pixel::gray(value)).expect("valid dimensions")
}

pub fn black_square(size: u32) -> PixelBuffer {
    PixelBuffer::new(size, size, vec![0; (size * size * 4) as usize]).expect("valid dimensions")
}

/// Black and white squares of `tile` pixels.
pub fn checkerboard(width: u32, height: u32, tile: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = if ((x / tile) + (y / tile)) % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[value, value, value, 255]);
        }
    }
    PixelBuffer::new(width, height, data).expect("valid dimensions")
}

/// A warm, bright surface crossed by wavy dark grooves. Luma stays well above
/// the foreground cutoff everywhere.
pub fn grooved_shell(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let (fx, fy) = (x as f32, y as f32);
            let wave = (fx * 0.45 + (fy * 0.2).sin() * 3.0 + fy * 0.1).sin();
            let groove = if wave > 0.6 { 90.0 * (wave - 0.6) / 0.4 } else { 0.0 };
            let base = 190.0 - groove - (fx * 0.07 + fy * 0.13).cos().abs() * 20.0;
            let r = base.clamp(40.0, 255.0) as u8;
            let g = (base * 0.85).clamp(40.0, 255.0) as u8;
            let b = (base * 0.6).clamp(40.0, 255.0) as u8;
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    PixelBuffer::new(width, height, data).expect("valid dimensions")
}
