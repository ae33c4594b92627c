//! Read/write views over row-major single-channel rasters.
//!
//! Both the owned [`Grid`](crate::grid::Grid) and borrowed 8-bit buffers
//! implement [`ImageView`], so conversions and raster I/O take either.
use crate::grid::Grid;

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Elements between the starts of consecutive rows.
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }

    /// Copy into a `Grid`, mapping each pixel through `f`.
    fn to_grid_with(&self, f: impl Fn(Self::Pixel) -> f32) -> Grid
    where
        Self: Sized,
    {
        let mut grid = Grid::zeros(self.height(), self.width());
        for (y, row) in self.rows().enumerate() {
            for (dst, &p) in grid.row_mut(y).iter_mut().zip(row) {
                *dst = f(p);
            }
        }
        grid
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
