//! Gradient-based edge processing: image gradients, non-maximum suppression
//! and a Canny detector.
//!
//! These are conventional counterparts to the [`crate::fbf`] boundary
//! pipeline, handy as baselines on the same inputs.
//!
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy`, magnitude,
//!   direction and an 8-bin orientation code.
//! - Direction-aligned non-maximum suppression, as a thinned grid or as sparse
//!   edge elements.
//! - Borders are clamped (replicated) during gradient computation.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::Canny;
pub use grad::{image_gradients, scharr_gradients, sobel_gradients, GradientKernel, Gradients};
pub use nms::{non_max_suppression, sparse_edges, EdgeElement};
