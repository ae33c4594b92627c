//! Point features: Harris corners and scale-space blobs.

pub mod blob;
pub mod harris;

pub use blob::{Blob, BlobDog, BlobLog};
pub use harris::{Corner, Harris};
