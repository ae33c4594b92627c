//! Elementwise arithmetic.
//!
//! Grid-with-scalar uses the `std::ops` traits on owned and borrowed grids.
//! Grid-with-grid goes through the fallible `try_*` methods so a shape
//! mismatch surfaces as an error instead of a panic.
use super::Grid;
use crate::error::Result;
use std::ops::{Add, Div, Mul, Neg, Sub};

impl Grid {
    pub fn try_add(&self, other: &Grid) -> Result<Grid> {
        self.zip_map(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Grid) -> Result<Grid> {
        self.zip_map(other, |a, b| a - b)
    }

    pub fn try_mul(&self, other: &Grid) -> Result<Grid> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Sample-wise quotient. Callers keep denominators away from zero.
    pub fn try_div(&self, other: &Grid) -> Result<Grid> {
        self.zip_map(other, |a, b| a / b)
    }

    /// Accumulate `other` into `self`.
    pub fn add_assign_grid(&mut self, other: &Grid) -> Result<()> {
        self.ensure_same_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }
}

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f32> for &Grid {
            type Output = Grid;

            fn $method(self, rhs: f32) -> Grid {
                self.map(|v| v $op rhs)
            }
        }

        impl $trait<f32> for Grid {
            type Output = Grid;

            fn $method(mut self, rhs: f32) -> Grid {
                for v in self.data.iter_mut() {
                    *v = *v $op rhs;
                }
                self
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl Neg for Grid {
    type Output = Grid;

    fn neg(self) -> Grid {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn grid_grid_ops() {
        let a = Grid::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Grid::filled(2, 2, 2.0);
        assert_eq!(a.try_add(&b).unwrap().data(), &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.try_sub(&b).unwrap().data(), &[-1.0, 0.0, 1.0, 2.0]);
        assert_eq!(a.try_mul(&b).unwrap().data(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(a.try_div(&b).unwrap().data(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn mismatched_shapes_fail() {
        let a = Grid::zeros(3, 2);
        let b = Grid::zeros(2, 3);
        assert!(matches!(a.try_add(&b), Err(Error::DimensionMismatch { .. })));
        let mut c = Grid::zeros(3, 3);
        assert!(c.add_assign_grid(&a).is_err());
    }

    #[test]
    fn scalar_ops_on_owned_and_borrowed() {
        let a = Grid::from_rows(&[[1.0, 2.0]]).unwrap();
        assert_eq!((&a + 1.0).data(), &[2.0, 3.0]);
        assert_eq!((&a * 3.0).data(), &[3.0, 6.0]);
        assert_eq!((a.clone() - 1.0).data(), &[0.0, 1.0]);
        assert_eq!((a.clone() / 2.0).data(), &[0.5, 1.0]);
        assert_eq!((-a).data(), &[-1.0, -2.0]);
    }
}
