//! Crate-wide error type.
//!
//! Every failure is deterministic: bad construction parameters, mismatched
//! grid shapes, or I/O at the edges of the crate. Nothing here is retried.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimensions must be equal. Got {left_rows}x{left_cols} and {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("stride must be positive")]
    InvalidStride,

    #[error("kernel {kernel_rows}x{kernel_cols} does not fit a {rows}x{cols} grid padded by {padding}")]
    KernelTooLarge {
        kernel_rows: usize,
        kernel_cols: usize,
        rows: usize,
        cols: usize,
        padding: usize,
    },

    #[error("transform matrix is not invertible")]
    SingularTransform,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
