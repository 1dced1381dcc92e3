// THEORY:
// Edge strength per pixel, measured as the magnitude of the 3x3 Sobel gradient
// of the smoothed luma. The one-pixel border ring has no complete neighbourhood
// and is left at 0 rather than extrapolated. Magnitudes are raw: a hard black to
// white step yields values well above 255, and downstream stages rely on that
// headroom (the groove score weights edges 3x).

use crate::core_modules::plane::plane::{GradientBuffer, Plane, SmoothedBuffer};
use rayon::prelude::*;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Sobel gradient magnitude `sqrt(gx^2 + gy^2)` for every interior pixel.
pub fn gradient_magnitude(smoothed: &SmoothedBuffer) -> GradientBuffer {
    let width = smoothed.width;
    let height = smoothed.height;
    let mut magnitude = Plane::new(width, height);

    if width < 3 || height < 3 {
        return magnitude;
    }

    magnitude
        .data
        .par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(y, row)| {
            let rows = [smoothed.row(y - 1), smoothed.row(y), smoothed.row(y + 1)];
            for x in 1..width - 1 {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for (ky, source_row) in rows.iter().enumerate() {
                    let neighbourhood = [source_row[x - 1], source_row[x], source_row[x + 1]];
                    for (kx, value) in neighbourhood.iter().enumerate() {
                        gx += value * SOBEL_X[ky][kx];
                        gy += value * SOBEL_Y[ky][kx];
                    }
                }
                row[x] = (gx * gx + gy * gy).sqrt();
            }
        });

    magnitude
}
