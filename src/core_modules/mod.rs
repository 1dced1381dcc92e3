pub mod fractal;
pub mod gradient;
pub mod grayscale;
pub mod groove_mask;
pub mod pixel;
pub mod pixel_buffer;
pub mod plane;
pub mod renderer;
pub mod smoothing;
pub mod threshold;
pub mod utils;
