//! Harris corner response `R = det(M) − k·trace(M)²`.
//!
//! `M` is the structure tensor of the Sobel derivatives, weighted by a
//! Gaussian window of width `sigma`.
use crate::error::{Error, Result};
use crate::filters::{Filter, GaussianFilter, SobelX, SobelY};
use crate::grid::Grid;
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Corner {
    pub row: usize,
    pub col: usize,
    pub response: f32,
}

#[derive(Clone, Debug)]
pub struct Harris {
    window: GaussianFilter,
    k: f32,
    threshold: f32,
}

impl Harris {
    pub fn new(sigma: f32, k: f32, threshold: f32) -> Result<Self> {
        if !(k > 0.0) {
            return Err(Error::invalid(format!("k must be positive, got {k}")));
        }
        Ok(Self {
            window: GaussianFilter::new(sigma)?,
            k,
            threshold,
        })
    }

    /// Dense corner response.
    pub fn response(&self, input: &Grid) -> Result<Grid> {
        let ix = SobelX.apply(input);
        let iy = SobelY.apply(input);
        let sxx = self.window.apply(&ix.try_mul(&ix)?);
        let syy = self.window.apply(&iy.try_mul(&iy)?);
        let sxy = self.window.apply(&ix.try_mul(&iy)?);
        let mut r = Grid::zeros(input.rows(), input.cols());
        for (i, out) in r.data_mut().iter_mut().enumerate() {
            let (a, b, c) = (sxx.data()[i], syy.data()[i], sxy.data()[i]);
            let trace = a + b;
            *out = a * b - c * c - self.k * trace * trace;
        }
        Ok(r)
    }

    /// Every pixel whose response exceeds the threshold, in row-major order.
    pub fn detect(&self, input: &Grid) -> Result<Vec<Corner>> {
        let r = self.response(input)?;
        let mut corners = Vec::new();
        for row in 0..r.rows() {
            for (col, &response) in r.row(row).iter().enumerate() {
                if response > self.threshold {
                    corners.push(Corner { row, col, response });
                }
            }
        }
        debug!("harris: {} corner pixels above {}", corners.len(), self.threshold);
        Ok(corners)
    }

    /// Binary corner map: 1 at detected corners, 0 elsewhere.
    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        let mut out = Grid::zeros(input.rows(), input.cols());
        for c in self.detect(input)? {
            out.set(c.row, c.col, 1.0)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant() -> Grid {
        Grid::from_fn(20, 20, |r, c| if r >= 10 && c >= 10 { 1.0 } else { 0.0 })
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(Harris::new(0.0, 0.04, 0.0).is_err());
        assert!(Harris::new(1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn corner_outscores_edge_and_flat() {
        let harris = Harris::new(1.0, 0.05, 0.0).unwrap();
        let r = harris.response(&quadrant()).unwrap();
        let corner = r.at(10, 10);
        assert!(corner > 0.0);
        // Straight edges give a negative response, flat regions zero.
        assert!(r.at(15, 10) < 0.0);
        assert!(r.at(3, 3).abs() < 1e-6);
    }

    #[test]
    fn detect_and_apply_agree() {
        let harris = Harris::new(1.0, 0.05, 0.5).unwrap();
        let corners = harris.detect(&quadrant()).unwrap();
        assert!(!corners.is_empty());
        assert!(corners
            .iter()
            .all(|c| (8..=12).contains(&c.row) && (8..=12).contains(&c.col)));
        let map = harris.apply(&quadrant()).unwrap();
        assert_eq!(map.sum() as usize, corners.len());
    }
}
