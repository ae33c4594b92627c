//! Owned single-channel `f32` grid in row-major layout.
//!
//! `Grid` is the value type every stage consumes and produces. Samples are
//! addressed by `(row, col)`; stages never mutate an input grid and always
//! allocate a fresh output of the same shape.
//!
//! - Construction helpers validate the sample count against `rows × cols`.
//! - Grid-with-grid arithmetic is fallible (`try_add`, `try_sub`, ...) and
//!   reports a `DimensionMismatch` on shape disagreement. Grid-with-scalar
//!   arithmetic uses the `std::ops` operators.
//! - Correlation operators live in [`correlate`]; border policies in [`border`].

pub mod border;
pub mod correlate;
mod ops;

pub use border::{map_index, BorderMode};

use crate::error::{Error, Result};
use crate::image::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Zero-initialized grid of `rows × cols`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap row-major samples. Fails when `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::SizeMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Evaluate `f(row, col)` for every sample.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Unchecked-by-contract access for hot loops; panics on a bad index.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Fails with `DimensionMismatch` unless both grids share a shape.
    pub fn ensure_same_shape(&self, other: &Grid) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        Ok(())
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            0.0
        } else {
            self.sum() / self.data.len() as f32
        }
    }

    /// Largest sample; `f32::NEG_INFINITY` for an empty grid.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Smallest sample; `f32::INFINITY` for an empty grid.
    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// `(row, col)` of the first maximum, or `None` when empty.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| (i / self.cols, i % self.cols))
    }

    pub fn map(&self, f: impl Fn(f32) -> f32) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two same-shaped grids sample by sample.
    pub fn zip_map(&self, other: &Grid, f: impl Fn(f32, f32) -> f32) -> Result<Grid> {
        self.ensure_same_shape(other)?;
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Half-wave rectification. Non-positive samples become exactly `+0.0`.
    pub fn relu(&self) -> Grid {
        self.map(|v| if v > 0.0 { v } else { 0.0 })
    }

    pub fn elementwise_max(&self, other: &Grid) -> Result<Grid> {
        self.zip_map(other, f32::max)
    }

    /// Linearly rescale into `[lo, hi]`. A constant grid maps to `lo`.
    pub fn normalized(&self, lo: f32, hi: f32) -> Grid {
        let min = self.min();
        let max = self.max();
        let range = max - min;
        if !range.is_finite() || range <= f32::EPSILON {
            return Grid::filled(self.rows, self.cols, lo);
        }
        let scale = (hi - lo) / range;
        self.map(|v| lo + (v - min) * scale)
    }

    pub fn transpose(&self) -> Grid {
        Grid::from_fn(self.cols, self.rows, |r, c| self.at(c, r))
    }

    /// Rotate by 180°, turning a correlation kernel into a convolution kernel.
    pub fn flipped(&self) -> Grid {
        let mut data = self.data.clone();
        data.reverse();
        Grid {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

impl ImageView for Grid {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.cols
    }
    #[inline]
    fn height(&self) -> usize {
        self.rows
    }
    #[inline]
    fn stride(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        Grid::row(self, y)
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}

impl ImageViewMut for Grid {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        Grid::row_mut(self, y)
    }
    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [f32]> {
        Some(&mut self.data)
    }
}
