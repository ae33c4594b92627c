//! Sub-pixel sampling and resizing.
//!
//! Coordinates are continuous `(x, y) = (col, row)` with pixel centers on the
//! integers. Every sampler clamps out-of-range taps to the nearest border
//! pixel.
use crate::error::{Error, Result};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    /// Catmull-Rom cubic over a 4×4 neighborhood.
    Bicubic,
}

#[inline]
fn clamped(grid: &Grid, row: isize, col: isize) -> f32 {
    let r = row.clamp(0, grid.rows() as isize - 1) as usize;
    let c = col.clamp(0, grid.cols() as isize - 1) as usize;
    grid.at(r, c)
}

#[inline]
fn catmull_rom(p: [f32; 4], t: f32) -> f32 {
    p[1] + 0.5
        * t
        * (p[2] - p[0]
            + t * (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]
                + t * (3.0 * (p[1] - p[2]) + p[3] - p[0])))
}

impl Interpolation {
    /// Value at `(x, y)`; 0 for an empty grid.
    pub fn sample(self, grid: &Grid, x: f32, y: f32) -> f32 {
        if grid.is_empty() {
            return 0.0;
        }
        match self {
            Interpolation::Nearest => clamped(grid, y.round() as isize, x.round() as isize),
            Interpolation::Bilinear => {
                let (x0, y0) = (x.floor(), y.floor());
                let (tx, ty) = (x - x0, y - y0);
                let (c, r) = (x0 as isize, y0 as isize);
                let top = clamped(grid, r, c) * (1.0 - tx) + clamped(grid, r, c + 1) * tx;
                let bottom =
                    clamped(grid, r + 1, c) * (1.0 - tx) + clamped(grid, r + 1, c + 1) * tx;
                top * (1.0 - ty) + bottom * ty
            }
            Interpolation::Bicubic => {
                let (x0, y0) = (x.floor(), y.floor());
                let (tx, ty) = (x - x0, y - y0);
                let (c, r) = (x0 as isize, y0 as isize);
                let mut column = [0.0; 4];
                for (i, slot) in column.iter_mut().enumerate() {
                    let row = r - 1 + i as isize;
                    let taps = [
                        clamped(grid, row, c - 1),
                        clamped(grid, row, c),
                        clamped(grid, row, c + 1),
                        clamped(grid, row, c + 2),
                    ];
                    *slot = catmull_rom(taps, tx);
                }
                catmull_rom(column, ty)
            }
        }
    }
}

/// Resample `grid` to `rows × cols`, aligning the corner pixel centers.
pub fn resize(grid: &Grid, rows: usize, cols: usize, method: Interpolation) -> Result<Grid> {
    if rows == 0 || cols == 0 {
        return Err(Error::invalid(format!(
            "target size must be non-empty, got {rows}x{cols}"
        )));
    }
    if grid.is_empty() {
        return Err(Error::invalid("cannot resize an empty grid"));
    }
    let ratio = |src: usize, dst: usize| {
        if dst > 1 {
            (src - 1) as f32 / (dst - 1) as f32
        } else {
            0.0
        }
    };
    let (ry, rx) = (ratio(grid.rows(), rows), ratio(grid.cols(), cols));
    Ok(Grid::from_fn(rows, cols, |r, c| {
        method.sample(grid, c as f32 * rx, r as f32 * ry)
    }))
}

/// Resize by a uniform `factor`; the target size is rounded.
pub fn rescale(grid: &Grid, factor: f32, method: Interpolation) -> Result<Grid> {
    if !(factor > 0.0) || !factor.is_finite() {
        return Err(Error::invalid(format!("scale factor must be positive, got {factor}")));
    }
    let rows = (grid.rows() as f32 * factor).round() as usize;
    let cols = (grid.cols() as f32 * factor).round() as usize;
    resize(grid, rows, cols, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid::from_rows(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]]).unwrap()
    }

    #[test]
    fn integer_coordinates_hit_pixels_exactly() {
        let g = sample_grid();
        for method in [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::Bicubic,
        ] {
            assert!((method.sample(&g, 1.0, 2.0) - 7.0).abs() < 1e-6, "{method:?}");
        }
    }

    #[test]
    fn bilinear_blends_and_clamps() {
        let g = sample_grid();
        assert!((Interpolation::Bilinear.sample(&g, 0.5, 0.5) - 2.0).abs() < 1e-6);
        assert_eq!(Interpolation::Bilinear.sample(&g, -3.0, 10.0), 6.0);
        assert_eq!(Interpolation::Nearest.sample(&g, 1.6, 0.4), 2.0);
    }

    #[test]
    fn bicubic_reproduces_linear_ramp() {
        let ramp = Grid::from_fn(6, 6, |_, c| c as f32);
        let v = Interpolation::Bicubic.sample(&ramp, 2.25, 2.5);
        assert!((v - 2.25).abs() < 1e-5);
    }

    #[test]
    fn resize_keeps_corners() {
        let g = sample_grid();
        let up = resize(&g, 5, 5, Interpolation::Bilinear).unwrap();
        assert_eq!(up.get(0, 0), Some(0.0));
        assert_eq!(up.get(4, 4), Some(8.0));
        assert!((up.at(2, 2) - 4.0).abs() < 1e-6);
        assert!(resize(&g, 0, 3, Interpolation::Nearest).is_err());
    }

    #[test]
    fn rescale_rounds_target_shape() {
        let g = Grid::zeros(10, 7);
        let half = rescale(&g, 0.5, Interpolation::Nearest).unwrap();
        assert_eq!(half.shape(), (5, 4));
        assert!(rescale(&g, 0.0, Interpolation::Nearest).is_err());
    }

    #[test]
    fn interpolation_serializes_lowercase() {
        let s = serde_json::to_string(&Interpolation::Bicubic).unwrap();
        assert_eq!(s, "\"bicubic\"");
    }
}
