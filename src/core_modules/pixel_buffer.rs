// THEORY:
// `PixelBuffer` is the immutable snapshot of a decoded image that an analysis
// run owns from start to finish. Its constructor is the only place where the
// layout contract is checked (non-zero dimensions, exactly four bytes per
// pixel), so every downstream stage can index without re-validating.
// The renderer's output shares the same layout and therefore the same type.

use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::{AnalysisError, Result};
use image::RgbaImage;

/// Row-major RGBA8 image data with known dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// The display buffer written by the view renderer. Same layout as the input.
pub type OutputBuffer = PixelBuffer;

impl PixelBuffer {
    /// Wraps raw RGBA bytes, rejecting zero dimensions and length mismatches.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(AnalysisError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self> {
        let bytes: [u8; CHANNELS] = pixel.into();
        let count = width as usize * height as usize;
        Self::new(width, height, bytes.repeat(count))
    }

    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The pixel at linear index `i` (row-major).
    #[inline]
    pub fn pixel(&self, i: usize) -> Pixel {
        Pixel::from(&self.data[i * CHANNELS..(i + 1) * CHANNELS])
    }

    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        let err = PixelBuffer::new(0, 4, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidDimensions {
                width: 0,
                height: 4
            }
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::BufferLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn filled_buffer_repeats_pixel() {
        let buffer = PixelBuffer::filled(3, 2, Pixel::new(9, 8, 7, 6)).unwrap();
        assert_eq!(buffer.pixel_count(), 6);
        assert_eq!(buffer.pixel(5), Pixel::new(9, 8, 7, 6));
    }

    #[test]
    fn converts_to_and_from_rgba_image() {
        let image = RgbaImage::from_pixel(5, 3, image::Rgba([10, 20, 30, 40]));
        let buffer = PixelBuffer::from_rgba_image(image).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (5, 3));
        let back = buffer.into_rgba_image().unwrap();
        assert_eq!(back.get_pixel(4, 2).0, [10, 20, 30, 40]);
    }
}
