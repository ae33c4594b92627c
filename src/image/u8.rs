use super::traits::ImageView;
use crate::grid::Grid;

/// Borrowed 8-bit grayscale raster with an explicit row stride.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Convert to a `Grid` with samples scaled into `[0, 1]`.
    pub fn to_unit_grid(&self) -> Grid {
        self.to_grid_with(|p| p as f32 / 255.0)
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_view_skips_padding_bytes() {
        let data = [0u8, 255, 9, 51, 102, 9];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        assert!(!view.is_contiguous());
        assert_eq!(view.get(1, 1), 102);
        let grid = view.to_unit_grid();
        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.get(0, 1), Some(1.0));
        assert!((grid.get(1, 0).unwrap() - 0.2).abs() < 1e-6);
    }
}
