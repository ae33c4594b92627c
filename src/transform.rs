//! Geometric warps driven by 3×3 homogeneous matrices.
//!
//! A matrix maps source `(x, y, 1)` to destination coordinates. Warps walk
//! the destination grid (same shape as the source) and pull each pixel
//! through the inverse matrix, so every output pixel gets exactly one
//! sample. Points that land outside the source are clamped by the sampler.
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::interpolate::Interpolation;
use nalgebra::{Matrix3, Vector3};

const EPS: f32 = 1e-9;

pub fn translation_matrix(dx: f32, dy: f32) -> Matrix3<f32> {
    Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0)
}

pub fn scale_matrix(sx: f32, sy: f32) -> Matrix3<f32> {
    Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Counter-clockwise rotation by `angle` radians about `(cx, cy)`.
pub fn rotation_matrix(angle: f32, cx: f32, cy: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    let r = Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0);
    translation_matrix(cx, cy) * r * translation_matrix(-cx, -cy)
}

pub fn shear_matrix(kx: f32, ky: f32) -> Matrix3<f32> {
    Matrix3::new(1.0, kx, 0.0, ky, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Map points through `h` with the projective divide. `None` when any point
/// goes to infinity.
pub fn apply_points(h: &Matrix3<f32>, pts: &[[f32; 2]]) -> Option<Vec<[f32; 2]>> {
    let mut out = Vec::with_capacity(pts.len());
    for &p in pts {
        let v = h * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        out.push([v[0] / w, v[1] / w]);
    }
    Some(out)
}

fn invert(matrix: &Matrix3<f32>) -> Result<Matrix3<f32>> {
    if matrix.iter().any(|v| !v.is_finite()) || matrix.determinant().abs() <= EPS {
        return Err(Error::SingularTransform);
    }
    matrix.try_inverse().ok_or(Error::SingularTransform)
}

fn warp(grid: &Grid, inverse: &Matrix3<f32>, method: Interpolation) -> Grid {
    Grid::from_fn(grid.rows(), grid.cols(), |row, col| {
        let v = inverse * Vector3::new(col as f32, row as f32, 1.0);
        let w = v[2];
        if w.abs() <= EPS {
            return 0.0;
        }
        method.sample(grid, v[0] / w, v[1] / w)
    })
}

/// Warp with an affine matrix; its last row must be `(0, 0, 1)`.
pub fn affine(grid: &Grid, matrix: &Matrix3<f32>, method: Interpolation) -> Result<Grid> {
    if matrix[(2, 0)] != 0.0 || matrix[(2, 1)] != 0.0 || matrix[(2, 2)] != 1.0 {
        return Err(Error::invalid(
            "affine matrix must have (0, 0, 1) as its last row",
        ));
    }
    Ok(warp(grid, &invert(matrix)?, method))
}

/// Warp with a full homography.
pub fn perspective(grid: &Grid, matrix: &Matrix3<f32>, method: Interpolation) -> Result<Grid> {
    Ok(warp(grid, &invert(matrix)?, method))
}

pub fn translate(grid: &Grid, dx: f32, dy: f32, method: Interpolation) -> Result<Grid> {
    affine(grid, &translation_matrix(dx, dy), method)
}

pub fn scale(grid: &Grid, sx: f32, sy: f32, method: Interpolation) -> Result<Grid> {
    affine(grid, &scale_matrix(sx, sy), method)
}

/// Rotate about the grid center.
pub fn rotate(grid: &Grid, angle: f32, method: Interpolation) -> Result<Grid> {
    let cx = grid.cols().saturating_sub(1) as f32 / 2.0;
    let cy = grid.rows().saturating_sub(1) as f32 / 2.0;
    affine(grid, &rotation_matrix(angle, cx, cy), method)
}

pub fn shear(grid: &Grid, kx: f32, ky: f32, method: Interpolation) -> Result<Grid> {
    affine(grid, &shear_matrix(kx, ky), method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn impulse(rows: usize, cols: usize, r: usize, c: usize) -> Grid {
        let mut g = Grid::zeros(rows, cols);
        g.set(r, c, 1.0).unwrap();
        g
    }

    #[test]
    fn translate_moves_impulse() {
        let g = impulse(5, 5, 1, 1);
        let out = translate(&g, 2.0, 1.0, Interpolation::Nearest).unwrap();
        assert_eq!(out.argmax(), Some((2, 3)));
        assert_eq!(out.at(1, 1), 0.0);
    }

    #[test]
    fn quarter_turn_about_center() {
        let g = impulse(5, 5, 0, 2);
        let out = rotate(&g, FRAC_PI_2, Interpolation::Nearest).unwrap();
        // (x, y) = (2, 0) → (4, 2) with y pointing down.
        assert_eq!(out.argmax(), Some((2, 4)));
    }

    #[test]
    fn scale_by_two_spreads_ramp() {
        let ramp = Grid::from_fn(4, 8, |_, c| c as f32);
        let out = scale(&ramp, 2.0, 1.0, Interpolation::Bilinear).unwrap();
        assert!((out.at(0, 4) - 2.0).abs() < 1e-6);
        assert!((out.at(0, 3) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn singular_and_non_affine_matrices_are_rejected() {
        let g = Grid::zeros(3, 3);
        assert!(matches!(
            scale(&g, 0.0, 1.0, Interpolation::Nearest),
            Err(Error::SingularTransform)
        ));
        let projective = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.001, 0.0, 1.0);
        assert!(affine(&g, &projective, Interpolation::Nearest).is_err());
        assert!(perspective(&g, &projective, Interpolation::Nearest).is_ok());
    }

    #[test]
    fn identity_perspective_is_lossless() {
        let g = Grid::from_fn(6, 4, |r, c| (r * 4 + c) as f32);
        let out = perspective(&g, &Matrix3::identity(), Interpolation::Bicubic).unwrap();
        assert_eq!(out, g);
    }

    #[test]
    fn apply_points_divides_by_w() {
        let h = Matrix3::new(2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0);
        let pts = apply_points(&h, &[[3.0, -1.0]]).unwrap();
        assert_eq!(pts, vec![[3.0, -1.0]]);
        let degenerate = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert!(apply_points(&degenerate, &[[0.0, 5.0]]).is_none());
    }
}
