//! Boundary segmentation with shunting and oriented cells.
//!
//! The pipeline models early boundary processing as a cascade of pure
//! grid-to-grid stages:
//!
//! 1. Illuminant discounting: on/off center-surround shunting cells divide
//!    local contrast by local luminance, removing slow illumination ramps.
//! 2. Oriented edge filtering: simple cells correlate the on/off maps with
//!    half-ellipse kernels (`near − alpha·far − beta`) and rectify. Uniform
//!    regions produce exactly zero.
//! 3. Polarity pooling: complex cells sum the four simple responses of one
//!    orientation and scale.
//! 4. Local competition: each complex map is divided by its own activity
//!    around it, excluding the collinear band, and thresholded.
//! 5. Winner-take-all: per pixel, only the strongest orientation survives.
//!
//! The orchestrator [`Fbf`] runs 1–5 over 2 scales × 8 orientations and
//! returns one boundary-strength map per scale. A [`PerceptStage`] turns
//! those into the final percept. The default [`UnrealizedPercept`] yields
//! zeros because fusion and fill-in are not implemented.
//!
//! Orientation convention: θ is the direction the boundary runs, so
//! `Orientation::VERTICAL` (θ = π/2) responds to left/right contrast.

pub mod complex;
pub mod hypercomplex;
pub mod kernels;
pub mod params;
pub mod percept;
pub mod pipeline;
pub mod shunting;
pub mod simple;
pub mod sink;

pub use complex::{ComplexCell, SimpleResponses};
pub use hypercomplex::{winner_take_all, CompetitiveStage, WinnerTakeAll};
pub use params::{
    CompetitionParams, ComplexCellParams, FbfParams, ReceptiveField, Scale, ShuntingParams,
    SimpleCellParams,
};
pub use percept::{PerceptStage, UnrealizedPercept};
pub use pipeline::{Fbf, FbfOutput, Illuminant, ScaleBoundaries};
pub use shunting::{Polarity, ShuntingCell};
pub use simple::{Side, SimpleCell};
pub use sink::{DebugSink, DirectorySink, MemorySink};
