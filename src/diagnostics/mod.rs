//! Diagnostics data model returned alongside pipeline results.
//!
//! `FbfTrace` is attached to every [`FbfOutput`](crate::fbf::FbfOutput) and
//! records stage timings plus a compact per-scale summary. All structures
//! serialize to camelCase JSON for tooling.

pub mod pipeline;
pub mod timing;

pub use pipeline::{FbfTrace, InputDescriptor, ScaleReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
