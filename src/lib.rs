#![doc = include_str!("../README.md")]

// Core value types.
pub mod angle;
pub mod error;
pub mod grid;
pub mod image;

// Boundary segmentation pipeline and its reporting.
pub mod config;
pub mod diagnostics;
pub mod fbf;

// Conventional image-processing building blocks.
pub mod edges;
pub mod enhance;
pub mod features;
pub mod filters;
pub mod interpolate;
pub mod stimulus;
pub mod transform;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::grid::Grid;

// Main entry point: the orchestrator and its output.
pub use crate::fbf::{Fbf, FbfOutput, FbfParams, Scale, ScaleBoundaries};

// Diagnostics attached to every run.
pub use crate::diagnostics::{FbfTrace, StageTiming, TimingBreakdown};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cortex_vision::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> cortex_vision::Result<()> {
/// let input = load_grayscale(Path::new("scene.png"))?;
/// let fbf = Fbf::new(FbfParams::default())?;
/// let out = fbf.apply(&input, Some(&DirectorySink::new("out/debug")))?;
/// for b in &out.boundaries {
///     println!("scale {}: max {:.4}", b.scale.level(), b.strength.max());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::angle::Orientation;
    pub use crate::fbf::{DebugSink, DirectorySink, MemorySink};
    pub use crate::image::{load_grayscale, save_grayscale, ImageU8};
    pub use crate::{Fbf, FbfOutput, FbfParams, Grid, Scale};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Individual cells, each a pure grid-to-grid transform.
    pub use crate::fbf::{
        winner_take_all, CompetitiveStage, ComplexCell, Illuminant, Polarity, ShuntingCell, Side,
        SimpleCell, SimpleResponses, WinnerTakeAll,
    };

    // Kernel builders.
    pub use crate::fbf::kernels::{
        competition_kernel, gaussian, half_ellipse, shunting_gaussians, simple_cell_kernel,
        unit_gaussian,
    };

    // Extension point after winner-take-all.
    pub use crate::fbf::{PerceptStage, UnrealizedPercept};

    // Structured diagnostics types.
    pub use crate::diagnostics::{InputDescriptor, ScaleReport};
}
