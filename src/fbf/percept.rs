//! Extension point for the stages after winner-take-all.
//!
//! Multi-scale fusion, long-range boundary completion, filling-in and
//! figure-ground separation would plug in here. None of them is realized:
//! the default stage returns a zero grid, and callers that need a defined
//! result should read the per-scale boundary maps instead.
use super::pipeline::ScaleBoundaries;
use crate::error::Result;
use crate::grid::Grid;

pub trait PerceptStage: Send + Sync {
    fn name(&self) -> &str;

    /// Build the percept from the original input and the per-scale boundaries.
    fn apply(&self, input: &Grid, boundaries: &[ScaleBoundaries]) -> Result<Grid>;
}

/// Placeholder percept: a zero grid of the input's shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnrealizedPercept;

impl PerceptStage for UnrealizedPercept {
    fn name(&self) -> &str {
        "unrealized"
    }

    fn apply(&self, input: &Grid, _boundaries: &[ScaleBoundaries]) -> Result<Grid> {
        Ok(Grid::zeros(input.rows(), input.cols()))
    }
}
