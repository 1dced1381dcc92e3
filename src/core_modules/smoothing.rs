// THEORY:
// The smoothing stage is a 3x3 binomial low-pass filter (weights 1-2-1 / 2-4-2 /
// 1-2-1, sum 16) that suppresses sensor noise before gradients are taken.
//
// Multiple passes are double-buffered: two equally sized planes are owned by
// the filter and swapped after each pass, so a pass never reads the plane it is
// writing. Border pixels are passed through from the source unchanged instead of
// reflecting or clamping neighbours; since every pass copies the border from its
// source, the border always equals the original luma.

use crate::core_modules::plane::plane::{LumaBuffer, Plane, SmoothedBuffer};
use rayon::prelude::*;
use std::mem;

const KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
const KERNEL_SUM: f32 = 16.0;

/// Applies `passes` rounds of the 3x3 filter. Zero passes is treated as one.
pub fn smooth(luma: &LumaBuffer, passes: usize) -> SmoothedBuffer {
    let mut source = luma.clone();
    let mut destination = Plane::new(luma.width, luma.height);

    for _ in 0..passes.max(1) {
        smoothing_pass(&source, &mut destination);
        mem::swap(&mut source, &mut destination);
    }

    source
}

fn smoothing_pass(source: &Plane, destination: &mut Plane) {
    let width = source.width;
    destination
        .data
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                *out = if source.is_border(x, y) {
                    source.get(x, y)
                } else {
                    weighted_average(source, x, y)
                };
            }
        });
}

#[inline]
fn weighted_average(source: &Plane, x: usize, y: usize) -> f32 {
    let mut sum = 0.0;
    for (ky, kernel_row) in KERNEL.iter().enumerate() {
        let row = source.row(y + ky - 1);
        sum += row[x - 1] * kernel_row[0] + row[x] * kernel_row[1] + row[x + 1] * kernel_row[2];
    }
    sum / KERNEL_SUM
}
