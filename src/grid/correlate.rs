//! 2-D cross-correlation and convolution.
//!
//! Two entry points cover every stage:
//!
//! - `correlate_padded` / `correlate_valid`: pad by `padding` on each side
//!   (zero padding for the `valid` variant), slide the kernel with `stride`,
//!   and produce `((rows + 2p − k) / stride + 1)` rows (same for columns).
//! - `correlate_same`: output keeps the input shape, the kernel is anchored
//!   at `(k.rows / 2, k.cols / 2)` and out-of-range samples are mirrored.
//!
//! Column lookups are resolved once per call into an index table, so the
//! inner loop is a plain gather. With the `parallel` feature output rows are
//! filled concurrently; the arithmetic per row is identical either way.
use super::{map_index, BorderMode, Grid};
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

struct Window {
    out_rows: usize,
    out_cols: usize,
    origin_row: isize,
    origin_col: isize,
    stride: usize,
}

impl Grid {
    /// Zero-padded strided correlation.
    ///
    /// The kernel must fit the unpadded grid; padding only widens the output.
    pub fn correlate_valid(&self, kernel: &Grid, padding: usize, stride: usize) -> Result<Grid> {
        if kernel.rows() > self.rows() || kernel.cols() > self.cols() {
            return Err(Error::KernelTooLarge {
                kernel_rows: kernel.rows(),
                kernel_cols: kernel.cols(),
                rows: self.rows(),
                cols: self.cols(),
                padding,
            });
        }
        self.correlate_padded(kernel, padding, stride, BorderMode::Constant(0.0))
    }

    /// Strided correlation with an explicit border policy for the padding.
    ///
    /// Unlike [`Grid::correlate_valid`] the kernel only has to fit the
    /// padded grid, so mirrored padding can carry a kernel wider than the
    /// input.
    pub fn correlate_padded(
        &self,
        kernel: &Grid,
        padding: usize,
        stride: usize,
        border: BorderMode,
    ) -> Result<Grid> {
        if stride == 0 {
            return Err(Error::InvalidStride);
        }
        if kernel.is_empty() {
            return Err(Error::invalid("correlation kernel must not be empty"));
        }
        let padded_rows = self.rows() + 2 * padding;
        let padded_cols = self.cols() + 2 * padding;
        if kernel.rows() > padded_rows || kernel.cols() > padded_cols {
            return Err(Error::KernelTooLarge {
                kernel_rows: kernel.rows(),
                kernel_cols: kernel.cols(),
                rows: self.rows(),
                cols: self.cols(),
                padding,
            });
        }
        let window = Window {
            out_rows: (padded_rows - kernel.rows()) / stride + 1,
            out_cols: (padded_cols - kernel.cols()) / stride + 1,
            origin_row: -(padding as isize),
            origin_col: -(padding as isize),
            stride,
        };
        Ok(correlate_window(self, kernel, &window, border))
    }

    /// Same-size correlation with mirrored (`Reflect101`) borders.
    pub fn correlate_same(&self, kernel: &Grid) -> Grid {
        self.correlate_same_with(kernel, BorderMode::Reflect101)
    }

    pub fn correlate_same_with(&self, kernel: &Grid, border: BorderMode) -> Grid {
        if kernel.is_empty() {
            return Grid::zeros(self.rows(), self.cols());
        }
        let window = Window {
            out_rows: self.rows(),
            out_cols: self.cols(),
            origin_row: -((kernel.rows() / 2) as isize),
            origin_col: -((kernel.cols() / 2) as isize),
            stride: 1,
        };
        correlate_window(self, kernel, &window, border)
    }

    /// Same-size convolution (correlation with the 180°-rotated kernel).
    pub fn convolve_same(&self, kernel: &Grid) -> Grid {
        self.correlate_same(&kernel.flipped())
    }
}

fn correlate_window(src: &Grid, kernel: &Grid, window: &Window, border: BorderMode) -> Grid {
    let mut out = Grid::zeros(window.out_rows, window.out_cols);
    if window.out_rows == 0 || window.out_cols == 0 {
        return out;
    }
    let fill = match border {
        BorderMode::Constant(v) => v,
        _ => 0.0,
    };

    let span = (window.out_cols - 1) * window.stride + kernel.cols();
    let col_map: Vec<Option<usize>> = (0..span)
        .map(|j| map_index(window.origin_col + j as isize, src.cols(), border))
        .collect();

    let fill_row = |orow: usize, out_row: &mut [f32]| {
        let base_row = window.origin_row + (orow * window.stride) as isize;
        for ki in 0..kernel.rows() {
            let k_row = kernel.row(ki);
            match map_index(base_row + ki as isize, src.rows(), border) {
                Some(r) => {
                    let src_row = src.row(r);
                    for (ocol, acc) in out_row.iter_mut().enumerate() {
                        let start = ocol * window.stride;
                        let mut sum = 0.0f32;
                        for (kj, &w) in k_row.iter().enumerate() {
                            sum += w * col_map[start + kj].map_or(fill, |c| src_row[c]);
                        }
                        *acc += sum;
                    }
                }
                None => {
                    if fill != 0.0 {
                        let k_sum: f32 = k_row.iter().sum();
                        for acc in out_row.iter_mut() {
                            *acc += k_sum * fill;
                        }
                    }
                }
            }
        }
    };

    let cols = window.out_cols;
    #[cfg(feature = "parallel")]
    {
        out.data_mut()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(orow, row)| fill_row(orow, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        out.data_mut()
            .chunks_mut(cols)
            .enumerate()
            .for_each(|(orow, row)| fill_row(orow, row));
    }

    out
}
