//! Global binary threshold.
use crate::grid::Grid;

pub const FOREGROUND: f32 = 255.0;

/// `255` where `v > t`, `0` elsewhere (including NaN samples).
pub fn binary_threshold(grid: &Grid, t: f32) -> Grid {
    grid.map(|v| if v > t { FOREGROUND } else { 0.0 })
}
