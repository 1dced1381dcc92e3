pub mod image_helper {
    use crate::core_modules::pixel_buffer::{OutputBuffer, PixelBuffer};
    use crate::error::{AnalysisError, Result};
    use image::ImageEncoder;
    use std::path::Path;

    /// Decodes an image file of any supported format into an RGBA pixel buffer.
    pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| AnalysisError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        PixelBuffer::from_rgba_image(decoded.into_rgba8())
    }

    /// Writes a rendered buffer as a PNG file.
    pub fn save(path: impl AsRef<Path>, buffer: &OutputBuffer) -> Result<()> {
        let path = path.as_ref();
        let encode_error = |source: image::ImageError| AnalysisError::Encode {
            path: path.to_path_buf(),
            source,
        };

        let output = std::fs::File::create(path).map_err(|e| encode_error(e.into()))?;
        let encoder = image::codecs::png::PngEncoder::new(std::io::BufWriter::new(output));

        encoder
            .write_image(
                buffer.as_bytes(),
                buffer.width(),
                buffer.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(encode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::image_helper::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use crate::error::AnalysisError;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("groove_vision_{}_{}", std::process::id(), name))
    }

    #[test]
    fn save_then_load_non_square_file() {
        let width = 7u32;
        let height = 3u32;
        let mut data = vec![255u8; (width * height * 4) as usize];
        let mut intensity = 0u8;
        for pixel in data.chunks_mut(4) {
            pixel[0] = intensity;
            pixel[1] = intensity;
            pixel[2] = intensity;
            intensity = intensity.wrapping_add(11);
        }
        let buffer = PixelBuffer::new(width, height, data).unwrap();
        let path = scratch_path("gradient.png");

        save(&path, &buffer).expect("Error Saving File.");
        let loaded = load(&path).expect("Error Loading File.");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, buffer);
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let err = load(scratch_path("does_not_exist.png")).unwrap_err();
        assert!(matches!(err, AnalysisError::InputUnavailable { .. }));
    }

    #[test]
    fn garbage_file_is_input_unavailable() {
        let path = scratch_path("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AnalysisError::InputUnavailable { .. }));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let buffer = PixelBuffer::filled(2, 2, Pixel::gray(0)).unwrap();
        let path = scratch_path("no_such_dir").join("out.png");
        assert!(matches!(save(&path, &buffer), Err(AnalysisError::Encode { .. })));
    }
}
