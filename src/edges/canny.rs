//! Canny edge detector: Gaussian smoothing → Sobel → NMS → hysteresis.
//!
//! Hysteresis seeds a stack with every strong pixel (`≥ high`) and grows
//! through 8-connected weak pixels (`≥ low`). The output marks edges with
//! 255 and everything else with 0.
use super::grad::sobel_gradients;
use super::nms::non_max_suppression;
use crate::error::{Error, Result};
use crate::filters::{Filter, GaussianFilter};
use crate::grid::Grid;
use log::debug;

pub const EDGE_VALUE: f32 = 255.0;

#[derive(Clone, Debug)]
pub struct Canny {
    smoothing: GaussianFilter,
    low: f32,
    high: f32,
}

impl Canny {
    pub fn new(sigma: f32, low: f32, high: f32) -> Result<Self> {
        if low > high {
            return Err(Error::invalid(format!(
                "low threshold {low} exceeds high threshold {high}"
            )));
        }
        Ok(Self {
            smoothing: GaussianFilter::new(sigma)?,
            low,
            high,
        })
    }

    /// Thinned gradient magnitude before thresholding.
    pub fn suppressed_magnitude(&self, input: &Grid) -> Grid {
        let smoothed = self.smoothing.apply(input);
        let grad = sobel_gradients(&smoothed);
        non_max_suppression(&grad.magnitude, &grad.direction)
    }

    fn hysteresis(&self, nms: &Grid) -> Grid {
        let (rows, cols) = nms.shape();
        let n = rows * cols;
        let mut out = Grid::zeros(rows, cols);
        let mut visited = vec![false; n];
        let mut stack = Vec::new();
        let data = nms.data();

        for (idx, &v) in data.iter().enumerate() {
            if v > 0.0 && v >= self.high {
                visited[idx] = true;
                stack.push(idx);
            }
        }
        let seeds = stack.len();

        while let Some(idx) = stack.pop() {
            out.data_mut()[idx] = EDGE_VALUE;
            let (y, x) = (idx / cols, idx % cols);
            for ny in y.saturating_sub(1)..=(y + 1).min(rows - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(cols - 1) {
                    let nidx = ny * cols + nx;
                    if !visited[nidx] && data[nidx] > 0.0 && data[nidx] >= self.low {
                        visited[nidx] = true;
                        stack.push(nidx);
                    }
                }
            }
        }
        debug!(
            "canny: {} strong seeds, {} edge pixels",
            seeds,
            visited.iter().filter(|&&v| v).count()
        );
        out
    }
}

impl Filter for Canny {
    fn apply(&self, input: &Grid) -> Grid {
        let nms = self.suppressed_magnitude(input);
        self.hysteresis(&nms)
    }
}
