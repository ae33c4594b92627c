//! Polarity pooling.
use super::params::ComplexCellParams;
use crate::error::Result;
use crate::grid::Grid;

/// The four simple-cell responses for one `(θ, scale)`.
#[derive(Clone, Debug)]
pub struct SimpleResponses {
    pub on_left: Grid,
    pub on_right: Grid,
    pub off_left: Grid,
    pub off_right: Grid,
}

/// Contrast-polarity-invariant edge energy: `F · (sum of the four responses)`.
#[derive(Clone, Copy, Debug)]
pub struct ComplexCell {
    gain: f32,
}

impl ComplexCell {
    pub fn new(params: &ComplexCellParams) -> Self {
        Self { gain: params.f }
    }

    pub fn apply(&self, responses: &SimpleResponses) -> Result<Grid> {
        let mut pooled = responses.on_left.clone();
        pooled.add_assign_grid(&responses.on_right)?;
        pooled.add_assign_grid(&responses.off_left)?;
        pooled.add_assign_grid(&responses.off_right)?;
        Ok(pooled * self.gain)
    }
}

impl Default for ComplexCell {
    fn default() -> Self {
        Self::new(&ComplexCellParams::default())
    }
}
