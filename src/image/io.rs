//! I/O helpers for grayscale rasters and JSON.
//!
//! - `load_grayscale`: read a PNG/JPEG into a `Grid` with samples in `[0, 1]`.
//! - `save_grayscale`: write a `Grid` to an 8-bit PNG, either min/max
//!   normalized or clamped to `[0, 255]`.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use crate::error::{Error, Result};
use crate::grid::Grid;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit luma and scale into `[0, 1]`.
pub fn load_grayscale(path: &Path) -> Result<Grid> {
    let img = image::open(path)?.into_luma8();
    Ok(grid_from_luma(&img))
}

pub fn grid_from_luma(img: &GrayImage) -> Grid {
    let w = img.width() as usize;
    let view = ImageU8 {
        w,
        h: img.height() as usize,
        stride: w,
        data: img.as_raw(),
    };
    view.to_unit_grid()
}

/// Quantize a grid into an 8-bit raster.
///
/// With `normalize` the grid is first rescaled from its own min/max onto
/// `[0, 255]`; otherwise samples are clamped to that range as-is.
pub fn grid_to_luma(grid: &Grid, normalize: bool) -> GrayImage {
    let scaled;
    let source = if normalize {
        scaled = grid.normalized(0.0, 255.0);
        &scaled
    } else {
        grid
    };
    let mut out = GrayImage::new(source.cols() as u32, source.rows() as u32);
    for y in 0..source.rows() {
        for (x, &px) in source.row(y).iter().enumerate() {
            let v = px.clamp(0.0, 255.0).round();
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out
}

pub fn save_grayscale(grid: &Grid, path: &Path, normalize: bool) -> Result<()> {
    if grid.is_empty() {
        return Err(Error::invalid(format!(
            "refusing to write empty grid to {}",
            path.display()
        )));
    }
    ensure_parent_dir(path)?;
    grid_to_luma(grid, normalize).save(path)?;
    Ok(())
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
