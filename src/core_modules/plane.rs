// THEORY:
// A `Plane` is the single-channel workhorse of the pipeline. Luma, the smoothed
// luma and the gradient magnitude all share one shape: one `f32` per pixel,
// row-major, with exactly the dimensions of the source image. Keeping them as one
// type (with descriptive aliases) guarantees that no stage can silently resize or
// reindex the data it hands to the next one.

pub mod plane {
    pub type Sample = f32;

    /// Owned single-channel f32 image in row-major layout.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Plane {
        /// Width of the plane in pixels.
        pub width: usize,
        /// Height of the plane in pixels.
        pub height: usize,
        /// Backing storage, `width * height` samples.
        pub data: Vec<Sample>,
    }

    impl Plane {
        /// A zero-filled plane of the given size.
        pub fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                data: vec![0.0; width * height],
            }
        }

        pub fn from_vec(width: usize, height: usize, data: Vec<Sample>) -> Self {
            debug_assert_eq!(data.len(), width * height);
            Self {
                width,
                height,
                data,
            }
        }

        #[inline]
        pub fn index(&self, x: usize, y: usize) -> usize {
            y * self.width + x
        }

        #[inline]
        pub fn get(&self, x: usize, y: usize) -> Sample {
            self.data[self.index(x, y)]
        }

        #[inline]
        pub fn set(&mut self, x: usize, y: usize, value: Sample) {
            let i = self.index(x, y);
            self.data[i] = value;
        }

        #[inline]
        pub fn row(&self, y: usize) -> &[Sample] {
            let start = y * self.width;
            &self.data[start..start + self.width]
        }

        pub fn len(&self) -> usize {
            self.data.len()
        }

        pub fn is_empty(&self) -> bool {
            self.data.is_empty()
        }

        /// True for pixels on the one-pixel frame of the image.
        #[inline]
        pub fn is_border(&self, x: usize, y: usize) -> bool {
            x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
        }
    }

    /// Per-pixel Rec. 601 luma of the source image.
    pub type LumaBuffer = Plane;
    /// Luma after the low-pass filter.
    pub type SmoothedBuffer = Plane;
    /// Sobel gradient magnitude, zero on the border ring.
    pub type GradientBuffer = Plane;
}
