//! Histogram equalization over distinct sample values.
//!
//! Values are not binned: every distinct sample is its own histogram entry,
//! so the mapping works for any float range. The cumulative distribution is
//! then stretched to `[0, 255]`.
use crate::grid::Grid;
use serde::Serialize;

/// Distinct sample values in ascending order with their counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub values: Vec<f32>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut sorted = grid.data().to_vec();
        sorted.sort_by(f32::total_cmp);
        let mut hist = Histogram::default();
        for v in sorted {
            match hist.values.last() {
                Some(last) if last.total_cmp(&v).is_eq() => {
                    if let Some(count) = hist.counts.last_mut() {
                        *count += 1;
                    }
                }
                _ => {
                    hist.values.push(v);
                    hist.counts.push(1);
                }
            }
        }
        hist
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Cumulative fraction of samples `≤ values[i]`.
    pub fn cdf(&self) -> Vec<f32> {
        let total = self.total().max(1) as f32;
        let mut acc = 0usize;
        self.counts
            .iter()
            .map(|&c| {
                acc += c;
                acc as f32 / total
            })
            .collect()
    }

    fn index_of(&self, v: f32) -> Option<usize> {
        self.values.binary_search_by(|probe| probe.total_cmp(&v)).ok()
    }
}

/// Replace every sample by its CDF value, then stretch to `[0, 255]`.
pub fn equalize(grid: &Grid) -> Grid {
    let hist = Histogram::from_grid(grid);
    let cdf = hist.cdf();
    grid.map(|v| hist.index_of(v).map_or(0.0, |i| cdf[i]))
        .normalized(0.0, 255.0)
}
