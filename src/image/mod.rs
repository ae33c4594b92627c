//! Raster views and image I/O around [`Grid`](crate::grid::Grid).
pub mod io;
pub mod traits;
pub mod u8;

pub use self::io::{grid_from_luma, grid_to_luma, load_grayscale, save_grayscale, write_json_file};
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
