//! Classic linear filters on [`Grid`]s.
//!
//! Every filter is a one-shot transform: build it once (validating its
//! parameters), then apply it to any number of grids. Borders are mirrored
//! (`Reflect101`) so flat regions stay flat up to the frame.
use crate::error::{Error, Result};
use crate::grid::Grid;
use std::f32::consts::PI;

/// A same-shape grid transform.
pub trait Filter {
    fn apply(&self, input: &Grid) -> Grid;
}

/// Isotropic Gaussian blur of width `2·ceil(3σ) + 1`, normalized to sum 1.
#[derive(Clone, Debug)]
pub struct GaussianFilter {
    sigma: f32,
    kernel: Grid,
}

impl GaussianFilter {
    pub fn new(sigma: f32) -> Result<Self> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(Error::invalid(format!("sigma must be positive, got {sigma}")));
        }
        let radius = (3.0 * sigma).ceil() as usize;
        let kernel = gaussian_kernel(sigma, radius);
        Ok(Self { sigma, kernel })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn kernel(&self) -> &Grid {
        &self.kernel
    }
}

impl Filter for GaussianFilter {
    fn apply(&self, input: &Grid) -> Grid {
        input.convolve_same(&self.kernel)
    }
}

/// Horizontal Sobel derivative (positive for dark-to-bright left to right).
#[derive(Clone, Copy, Debug, Default)]
pub struct SobelX;

/// Vertical Sobel derivative (positive for dark-to-bright top to bottom).
#[derive(Clone, Copy, Debug, Default)]
pub struct SobelY;

pub(crate) const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
pub(crate) const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

fn kernel3(k: &[[f32; 3]; 3]) -> Grid {
    Grid::from_fn(3, 3, |r, c| k[r][c])
}

impl Filter for SobelX {
    fn apply(&self, input: &Grid) -> Grid {
        // Correlation keeps the sign convention of the tap table.
        input.correlate_same(&kernel3(&SOBEL_X))
    }
}

impl Filter for SobelY {
    fn apply(&self, input: &Grid) -> Grid {
        input.correlate_same(&kernel3(&SOBEL_Y))
    }
}

/// Laplacian of Gaussian with a zero-mean kernel, negative at its center.
#[derive(Clone, Debug)]
pub struct LaplacianOfGaussian {
    sigma: f32,
    kernel: Grid,
}

impl LaplacianOfGaussian {
    pub fn new(sigma: f32) -> Result<Self> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(Error::invalid(format!("sigma must be positive, got {sigma}")));
        }
        let radius = (3.0 * sigma).ceil() as isize;
        let size = (2 * radius + 1) as usize;
        let s2 = sigma * sigma;
        let scale = -1.0 / (PI * s2 * s2);
        let mut kernel = Grid::from_fn(size, size, |r, c| {
            let (dr, dc) = (r as isize - radius, c as isize - radius);
            let q = (dr * dr + dc * dc) as f32 / (2.0 * s2);
            scale * (1.0 - q) * (-q).exp()
        });
        // Truncation leaves a small DC term; remove it so flat input maps to 0.
        let mean = kernel.mean();
        kernel.data_mut().iter_mut().for_each(|v| *v -= mean);
        Ok(Self { sigma, kernel })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn kernel(&self) -> &Grid {
        &self.kernel
    }
}

impl Filter for LaplacianOfGaussian {
    fn apply(&self, input: &Grid) -> Grid {
        input.convolve_same(&self.kernel)
    }
}

/// Square Gaussian kernel `exp(−r²/2σ²)` normalized to sum 1.
fn gaussian_kernel(sigma: f32, radius: usize) -> Grid {
    let r = radius as isize;
    let size = 2 * radius + 1;
    let denom = 2.0 * sigma * sigma;
    let kernel = Grid::from_fn(size, size, |row, col| {
        let (dr, dc) = (row as isize - r, col as isize - r);
        (-((dr * dr + dc * dc) as f32) / denom).exp()
    });
    let sum = kernel.sum();
    kernel / sum
}
