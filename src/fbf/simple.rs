//! Oriented, polarity-selective edge cells.
use super::kernels::simple_cell_kernel;
use super::params::{Scale, SimpleCellParams};
use crate::angle::Orientation;
use crate::error::Result;
use crate::grid::{BorderMode, Grid};

/// Which half of the receptive field is excitatory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Simple cell tuned to one `(θ, scale, side)`.
///
/// The same cell is applied to both the on and the off illuminant maps; the
/// kernel does not depend on polarity.
#[derive(Clone, Debug)]
pub struct SimpleCell {
    orientation: Orientation,
    scale: Scale,
    side: Side,
    kernel: Grid,
}

impl SimpleCell {
    /// Build with default receptive fields. `scale` is the level, `1` or `2`.
    pub fn new(orientation: Orientation, scale: u8, side: Side) -> Result<Self> {
        Self::with_params(
            orientation,
            Scale::from_level(scale)?,
            side,
            &SimpleCellParams::default(),
        )
    }

    pub fn with_params(
        orientation: Orientation,
        scale: Scale,
        side: Side,
        params: &SimpleCellParams,
    ) -> Result<Self> {
        params.validate()?;
        let kernel = simple_cell_kernel(params.field(scale), params.beta, orientation, side);
        Ok(Self {
            orientation,
            scale,
            side,
            kernel,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kernel(&self) -> &Grid {
        &self.kernel
    }

    /// Rectified, shape-preserving response.
    ///
    /// The kernel is centered with `extent / 2` padding on each side; the
    /// padding mirrors the input so uniform regions stay silent up to the
    /// border.
    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        let padding = self.kernel.rows() / 2;
        let response = input.correlate_padded(&self.kernel, padding, 1, BorderMode::Reflect101)?;
        Ok(response.relu())
    }
}
