//! Image gradients (Sobel/Scharr) with magnitude, direction and a quantized
//! orientation.
//!
//! - Correlates a 3×3 kernel pair (`X` and `Y`) with border clamping.
//! - Outputs per-pixel `gx`, `gy`, `magnitude = sqrt(gx² + gy²)` and
//!   `direction = atan2(gy, gx)` in (−π, π].
//! - Caches an 8-bin, π-periodic orientation code per pixel for histogramming.
//!
//! Complexity: O(rows·cols) per pass.
use crate::angle::normalize_half_pi;
use crate::filters::{SOBEL_X, SOBEL_Y};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

type Kernel3 = [[f32; 3]; 3];

const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKernel {
    #[default]
    Sobel,
    Scharr,
}

impl GradientKernel {
    fn taps(self) -> (&'static Kernel3, &'static Kernel3) {
        match self {
            GradientKernel::Sobel => (&SOBEL_X, &SOBEL_Y),
            GradientKernel::Scharr => (&SCHARR_X, &SCHARR_Y),
        }
    }
}

/// Per-pixel gradient maps.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub gx: Grid,
    pub gy: Grid,
    pub magnitude: Grid,
    /// `atan2(gy, gx)` in radians.
    pub direction: Grid,
    /// Orientation folded to [0, π) and split into 8 bins.
    pub ori_q8: Vec<u8>,
}

impl Gradients {
    pub fn rows(&self) -> usize {
        self.gx.rows()
    }

    pub fn cols(&self) -> usize {
        self.gx.cols()
    }
}

#[inline]
fn quantize_orientation(angle: f32) -> u8 {
    let folded = normalize_half_pi(angle);
    ((folded * (8.0 / PI)).floor() as usize).min(7) as u8
}

pub fn image_gradients(input: &Grid, kernel: GradientKernel) -> Gradients {
    let (rows, cols) = input.shape();
    let mut gx = Grid::zeros(rows, cols);
    let mut gy = Grid::zeros(rows, cols);
    let mut magnitude = Grid::zeros(rows, cols);
    let mut direction = Grid::zeros(rows, cols);
    let mut ori_q8 = vec![0u8; rows * cols];
    let (kernel_x, kernel_y) = kernel.taps();

    for y in 0..rows {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(rows - 1)];
        let src = [input.row(y_idx[0]), input.row(y_idx[1]), input.row(y_idx[2])];
        for x in 0..cols {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(cols - 1)];
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in src.iter().enumerate() {
                for (kx, &xi) in x_idx.iter().enumerate() {
                    sum_x += row[xi] * kernel_x[ky][kx];
                    sum_y += row[xi] * kernel_y[ky][kx];
                }
            }
            let angle = sum_y.atan2(sum_x);
            gx.row_mut(y)[x] = sum_x;
            gy.row_mut(y)[x] = sum_y;
            magnitude.row_mut(y)[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
            direction.row_mut(y)[x] = angle;
            ori_q8[y * cols + x] = quantize_orientation(angle);
        }
    }

    Gradients {
        gx,
        gy,
        magnitude,
        direction,
        ori_q8,
    }
}

pub fn sobel_gradients(input: &Grid) -> Gradients {
    image_gradients(input, GradientKernel::Sobel)
}

/// Scharr gradients (better rotational symmetry than Sobel).
pub fn scharr_gradients(input: &Grid) -> Gradients {
    image_gradients(input, GradientKernel::Scharr)
}
