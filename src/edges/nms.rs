//! Non-maximum suppression on gradient magnitude along the gradient direction.
//!
//! The direction is rounded to the nearest multiple of π/4 to pick the two
//! comparison neighbors. A pixel survives if it is strictly greater than the
//! neighbor behind it and not smaller than the one ahead, so a two-pixel
//! plateau (a step edge falling between pixels) keeps exactly one pixel.
//! The outermost 1-pixel frame is always suppressed so neighbor lookups
//! never leave the grid.
use super::grad::Gradients;
use crate::grid::Grid;
use serde::Serialize;
use std::f32::consts::FRAC_PI_4;

/// A sparse edge sample after NMS, suitable for visualization.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeElement {
    pub row: u32,
    pub col: u32,
    pub magnitude: f32,
    /// Gradient direction in radians, range (−π, π].
    pub direction: f32,
}

/// Row/column step toward the neighbor along `direction`.
#[inline]
fn neighbor_step(direction: f32) -> (isize, isize) {
    let sector = (direction / FRAC_PI_4).round() as i32;
    match sector.rem_euclid(4) {
        0 => (0, 1),
        1 => (1, 1),
        2 => (1, 0),
        _ => (1, -1),
    }
}

#[inline]
fn is_local_max(magnitude: &Grid, direction: f32, row: usize, col: usize) -> bool {
    let (dr, dc) = neighbor_step(direction);
    let m = magnitude.at(row, col);
    let ahead = magnitude.at((row as isize + dr) as usize, (col as isize + dc) as usize);
    let behind = magnitude.at((row as isize - dr) as usize, (col as isize - dc) as usize);
    m >= ahead && m > behind
}

/// Thin `magnitude` to ridges along `direction` (both same shape).
///
/// Returns a grid holding the surviving magnitudes and zeros elsewhere.
pub fn non_max_suppression(magnitude: &Grid, direction: &Grid) -> Grid {
    let (rows, cols) = magnitude.shape();
    let mut out = Grid::zeros(rows, cols);
    if rows < 3 || cols < 3 || direction.shape() != (rows, cols) {
        return out;
    }
    for row in 1..rows - 1 {
        let dir_row = direction.row(row);
        for col in 1..cols - 1 {
            if is_local_max(magnitude, dir_row[col], row, col) {
                out.row_mut(row)[col] = magnitude.at(row, col);
            }
        }
    }
    out
}

/// NMS followed by a magnitude threshold, emitted as sparse elements.
pub fn sparse_edges(grad: &Gradients, threshold: f32) -> Vec<EdgeElement> {
    let thin = non_max_suppression(&grad.magnitude, &grad.direction);
    let mut edges = Vec::new();
    for row in 0..thin.rows() {
        for (col, &m) in thin.row(row).iter().enumerate() {
            if m >= threshold && m > 0.0 {
                edges.push(EdgeElement {
                    row: row as u32,
                    col: col as u32,
                    magnitude: m,
                    direction: grad.direction.at(row, col),
                });
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::sobel_gradients;

    fn ridge_image() -> Grid {
        // Intensity ramp peaking in gradient at column 4.
        Grid::from_fn(9, 9, |_, c| match c {
            0..=2 => 0.0,
            3 => 0.1,
            4 => 0.5,
            _ => 1.0,
        })
    }

    #[test]
    fn neighbor_steps_cover_four_axes() {
        assert_eq!(neighbor_step(0.0), (0, 1));
        assert_eq!(neighbor_step(std::f32::consts::PI), (0, 1));
        assert_eq!(neighbor_step(FRAC_PI_4), (1, 1));
        assert_eq!(neighbor_step(-std::f32::consts::FRAC_PI_2), (1, 0));
        assert_eq!(neighbor_step(3.0 * FRAC_PI_4), (1, -1));
    }

    #[test]
    fn nms_keeps_single_column_ridge() {
        let g = sobel_gradients(&ridge_image());
        let thin = non_max_suppression(&g.magnitude, &g.direction);
        for row in 1..8 {
            let kept: Vec<usize> = (0..9).filter(|&c| thin.at(row, c) > 0.0).collect();
            assert_eq!(kept.len(), 1, "row {row}: {kept:?}");
        }
        assert!(thin.row(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn sparse_edges_respect_threshold() {
        let g = sobel_gradients(&ridge_image());
        let all = sparse_edges(&g, 0.0);
        assert_eq!(all.len(), 7);
        assert!(all.iter().all(|e| e.direction.abs() < 1e-6));
        assert!(sparse_edges(&g, 100.0).is_empty());
    }

    #[test]
    fn symmetric_step_keeps_one_column() {
        let step = Grid::from_fn(7, 8, |_, c| if c >= 4 { 1.0 } else { 0.0 });
        let g = sobel_gradients(&step);
        let thin = non_max_suppression(&g.magnitude, &g.direction);
        for row in 1..6 {
            let kept: Vec<usize> = (0..8).filter(|&c| thin.at(row, c) > 0.0).collect();
            assert_eq!(kept, vec![3], "row {row}");
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let g = sobel_gradients(&Grid::filled(6, 6, 0.5));
        assert!(sparse_edges(&g, 0.0).is_empty());
    }
}
