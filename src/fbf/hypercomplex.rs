//! Competitive stages over the eight orientations of one scale.
//!
//! Stage 1 divides each complex-cell map by its own pooled neighborhood:
//!
//! ```text
//! denominator_θ = MU · Σ_θ' (C_θ ⊛ K_θ) + EPSILON
//! output_θ      = relu(C_θ / denominator_θ − TAU)
//! ```
//!
//! The summand does not depend on θ', so the sum is eight copies of
//! `C_θ ⊛ K_θ`. `K_θ` leaves out the collinear band along θ: evidence on the
//! same boundary line never inhibits itself, while parallel activity of the
//! same orientation beside it does. Other orientations never enter a map's
//! denominator. The stage still takes the full orientation set because
//! winner-take-all follows it.
//!
//! Stage 2 keeps, per pixel, only the strongest orientation.
use super::kernels::competition_kernel;
use super::params::{CompetitionParams, ReceptiveField, Scale};
use crate::angle::{Orientation, ORIENTATION_COUNT};
use crate::error::{Error, Result};
use crate::grid::Grid;

#[derive(Clone, Debug)]
pub struct CompetitiveStage {
    scale: Scale,
    kernels: Vec<Grid>,
    params: CompetitionParams,
}

impl CompetitiveStage {
    pub fn new(scale: Scale, field: &ReceptiveField, params: &CompetitionParams) -> Result<Self> {
        params.validate()?;
        if field.competition_size == 0 {
            return Err(Error::invalid("competition kernel size must be positive"));
        }
        let kernels = Orientation::all()
            .map(|o| competition_kernel(field.competition_size, o))
            .collect();
        Ok(Self {
            scale,
            kernels,
            params: *params,
        })
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn kernel(&self, orientation: Orientation) -> &Grid {
        &self.kernels[orientation.index()]
    }

    /// Run stage 1 on the full, index-ordered set of complex-cell maps.
    pub fn apply(&self, complex: &[Grid]) -> Result<Vec<Grid>> {
        check_orientation_set(complex)?;
        let (eps, tau) = (self.params.epsilon, self.params.tau);
        let gain = self.params.mu * ORIENTATION_COUNT as f32;
        complex
            .iter()
            .zip(&self.kernels)
            .map(|(c, k)| {
                let denominator = c.correlate_same(k) * gain + eps;
                c.zip_map(&denominator, |v, d| {
                    let r = v / d - tau;
                    if r > 0.0 {
                        r
                    } else {
                        0.0
                    }
                })
            })
            .collect()
    }
}

/// Stage 2 output: per-pixel maximum and the orientation that produced it.
#[derive(Clone, Debug)]
pub struct WinnerTakeAll {
    pub strength: Grid,
    /// Winning orientation per pixel, row-major; ties keep the lower index.
    pub winner: Vec<Orientation>,
}

pub fn winner_take_all(maps: &[Grid]) -> Result<WinnerTakeAll> {
    let first = check_orientation_set(maps)?;
    let mut strength = first.clone();
    let mut winner = vec![Orientation::HORIZONTAL; first.data().len()];
    for (map, orientation) in maps.iter().zip(Orientation::all()).skip(1) {
        for ((best, w), &v) in strength
            .data_mut()
            .iter_mut()
            .zip(winner.iter_mut())
            .zip(map.data())
        {
            if v > *best {
                *best = v;
                *w = orientation;
            }
        }
    }
    Ok(WinnerTakeAll { strength, winner })
}

fn check_orientation_set(maps: &[Grid]) -> Result<&Grid> {
    if maps.len() != ORIENTATION_COUNT {
        return Err(Error::invalid(format!(
            "expected {ORIENTATION_COUNT} orientation maps, got {}",
            maps.len()
        )));
    }
    let first = &maps[0];
    for map in &maps[1..] {
        first.ensure_same_shape(map)?;
    }
    Ok(first)
}
