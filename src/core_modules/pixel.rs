// THEORY:
// `Pixel` is the smallest unit of the engine: one RGBA sample read out of the
// decoded image. It is a "dumb" container with single-pixel heuristics only.
// Anything needing neighbours (smoothing, gradients, box counting) lives in the
// plane-level stages.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = [Byte; CHANNELS];
    pub type Channel = Byte;
    pub type Luma = f32;

    pub const CHANNELS: usize = 4;

    /// A single RGBA pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        /// An opaque gray pixel.
        pub fn gray(value: Channel) -> Self {
            Pixel::new(value, value, value, 255)
        }

        /// Rec. 601 luma. Alpha is ignored.
        ///
        /// Accumulated in f64 so that gray pixels map to exactly their channel value.
        #[inline]
        pub fn luma(&self) -> Luma {
            (0.299_f64 * self.red as f64 + 0.587_f64 * self.green as f64 + 0.114_f64 * self.blue as f64)
                as Luma
        }
    }

    impl From<&[Byte]> for Pixel {
        /// Reads the first four bytes of an RGBA quadruple.
        fn from(bytes: &[Byte]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            [pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn luma_uses_rec601_weights() {
        assert_eq!(Pixel::new(0, 0, 0, 255).luma(), 0.0);
        assert!((Pixel::new(255, 0, 0, 0).luma() - 76.245).abs() < 1e-3);
        assert!((Pixel::new(0, 255, 0, 0).luma() - 149.685).abs() < 1e-3);
        assert!((Pixel::new(0, 0, 255, 0).luma() - 29.07).abs() < 1e-3);
    }

    #[test]
    fn byte_round_trip() {
        let bytes: &[u8] = &[1, 2, 3, 4];
        let pixel = Pixel::from(bytes);
        assert_eq!(Bytes::from(pixel), [1, 2, 3, 4]);
    }
}
