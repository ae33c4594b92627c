//! Point-wise intensity operators.

pub mod histogram;
pub mod threshold;

pub use histogram::{equalize, Histogram};
pub use threshold::binary_threshold;
