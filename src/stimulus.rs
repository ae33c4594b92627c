//! Synthetic test stimuli.
//!
//! Random generators take the caller's RNG so runs are reproducible with a
//! seeded `StdRng`.
use crate::error::{Error, Result};
use crate::grid::Grid;
use rand::Rng;

/// `n` axis-aligned rectangles of uniform random value in `[0, 1)` painted
/// over a zero background; later rectangles cover earlier ones.
pub fn random_mondrian<R: Rng + ?Sized>(rows: usize, cols: usize, n: usize, rng: &mut R) -> Grid {
    let mut out = Grid::zeros(rows, cols);
    if rows == 0 || cols == 0 {
        return out;
    }
    for _ in 0..n {
        let (mut r0, mut r1) = (rng.gen_range(0..rows), rng.gen_range(0..rows));
        let (mut c0, mut c1) = (rng.gen_range(0..cols), rng.gen_range(0..cols));
        if r0 > r1 {
            std::mem::swap(&mut r0, &mut r1);
        }
        if c0 > c1 {
            std::mem::swap(&mut c0, &mut c1);
        }
        let value: f32 = rng.gen_range(0.0..1.0);
        for r in r0..=r1 {
            out.row_mut(r)[c0..=c1].fill(value);
        }
    }
    out
}

/// Replace each sample, with the given probability, by a uniform value in
/// `[0, 1)`.
pub fn add_noise<R: Rng + ?Sized>(grid: &mut Grid, probability: f32, rng: &mut R) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(Error::invalid(format!(
            "noise probability must lie in [0, 1], got {probability}"
        )));
    }
    for v in grid.data_mut() {
        if rng.gen::<f32>() < probability {
            *v = rng.gen_range(0.0..1.0);
        }
    }
    Ok(())
}

/// Step edge through the grid center whose boundary runs at `angle`.
///
/// Uses the boundary convention of [`crate::angle::Orientation`]: at
/// `angle = π/2` the boundary is vertical and the right half is `high`.
pub fn oriented_step(rows: usize, cols: usize, angle: f32, low: f32, high: f32) -> Grid {
    let (s, c) = angle.sin_cos();
    let cr = rows.saturating_sub(1) as f32 / 2.0;
    let cc = cols.saturating_sub(1) as f32 / 2.0;
    Grid::from_fn(rows, cols, |r, col| {
        let across = (col as f32 - cc) * s - (r as f32 - cr) * c;
        if across >= 0.0 {
            high
        } else {
            low
        }
    })
}
