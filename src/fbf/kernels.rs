//! Kernel generators for the three cell families.
//!
//! - Center-surround Gaussians for the shunting cells.
//! - Oriented half-ellipses for the simple cells.
//! - Oriented competition kernels for the first hypercomplex stage.
//!
//! All generators are pure functions of their parameters. Kernels used as
//! a divisor basis come out normalized (unit Gaussian and competition kernel
//! sum to 1) and must not be re-normalized by callers.
//!
//! Geometry: for an offset `(dr, dc)` from the kernel center and boundary
//! orientation θ,
//!
//! ```text
//! along  = dc·cosθ + dr·sinθ
//! across = dc·sinθ − dr·cosθ
//! ```
//!
//! so `along` runs with the boundary and `across` crosses it.
use super::params::{ReceptiveField, ShuntingParams};
use super::simple::Side;
use crate::angle::Orientation;
use crate::grid::Grid;
use log::trace;

#[inline]
fn rotate(dr: f32, dc: f32, orientation: Orientation) -> (f32, f32) {
    let (sin, cos) = orientation.angle().sin_cos();
    (dc * cos + dr * sin, dc * sin - dr * cos)
}

/// Gaussian profile `exp(−2(dr² + dc²)/spread²)` on a `(2·radius + 1)²`
/// window, normalized to sum 1.
pub fn unit_gaussian(spread: f32, radius: usize) -> Grid {
    let size = 2 * radius + 1;
    let r = radius as f32;
    let denom = spread * spread;
    let mut g = Grid::from_fn(size, size, |row, col| {
        let dr = row as f32 - r;
        let dc = col as f32 - r;
        (-2.0 * (dr * dr + dc * dc) / denom).exp()
    });
    let sum = g.sum();
    if sum > 0.0 {
        g = g / sum;
    }
    g
}

/// Gaussian of the given amplitude: `amplitude · unit_gaussian`, summing to
/// `amplitude`.
pub fn gaussian(amplitude: f32, spread: f32, radius: usize) -> Grid {
    unit_gaussian(spread, radius) * amplitude
}

/// Center and surround Gaussians `G(C, ALPHA)` and `G(E, BETA)` on a shared window.
pub fn shunting_gaussians(params: &ShuntingParams) -> (Grid, Grid) {
    let radius = params.kernel_radius();
    trace!("shunting kernels: radius {radius}");
    (
        gaussian(params.c, params.alpha, radius),
        gaussian(params.e, params.beta, radius),
    )
}

/// Binary half-ellipse on an `extent × extent` window.
///
/// Samples with `along²/major² + across²/minor² ≤ 1` are inside the
/// ellipse; `Side::Left` keeps `across ≤ 0`, `Side::Right` keeps
/// `across ≥ 0`. The midline belongs to both halves.
pub fn half_ellipse(field: &ReceptiveField, orientation: Orientation, side: Side) -> Grid {
    let extent = field.extent();
    let center = (extent / 2) as f32;
    let major2 = (field.major * field.major) as f32;
    let minor2 = (field.minor * field.minor) as f32;
    Grid::from_fn(extent, extent, |row, col| {
        let (along, across) = rotate(row as f32 - center, col as f32 - center, orientation);
        let inside = along * along / major2 + across * across / minor2 <= 1.0;
        let on_side = match side {
            Side::Left => across <= 1e-4,
            Side::Right => across >= -1e-4,
        };
        if inside && on_side {
            1.0
        } else {
            0.0
        }
    })
}

/// Whole simple-cell kernel `near − alpha·far − beta`, scaled by `1/|Σ|`.
///
/// `near` is the half on `side`. Because `alpha > 1` the raw sum is
/// negative, so the scaled kernel sums to −1 and any uniform non-negative
/// input maps to a non-positive response.
///
/// Normalization is by magnitude: unit total weight with the sign kept,
/// never a kernel summing to +1.
pub fn simple_cell_kernel(
    field: &ReceptiveField,
    beta: f32,
    orientation: Orientation,
    side: Side,
) -> Grid {
    let near = half_ellipse(field, orientation, side);
    let far = half_ellipse(field, orientation, side.opposite());
    let mut kernel = Grid::zeros(near.rows(), near.cols());
    for ((k, &n), &f) in kernel.data_mut().iter_mut().zip(near.data()).zip(far.data()) {
        *k = n - field.alpha * f - beta;
    }
    let sum = kernel.sum();
    trace!(
        "simple kernel {}x{} θ#{} {:?}: raw sum {sum:.3}",
        kernel.rows(),
        kernel.cols(),
        orientation.index(),
        side
    );
    if sum.abs() > f32::EPSILON {
        kernel = kernel / sum.abs();
    }
    kernel
}

/// Square `size × size` kernel of ones with the one-sample band through the
/// center along θ cleared, normalized to sum 1.
pub fn competition_kernel(size: usize, orientation: Orientation) -> Grid {
    let center = (size / 2) as f32;
    let mut kernel = Grid::from_fn(size, size, |row, col| {
        let (_, across) = rotate(row as f32 - center, col as f32 - center, orientation);
        if across.abs() <= 0.5 {
            0.0
        } else {
            1.0
        }
    });
    let sum = kernel.sum();
    if sum > 0.0 {
        kernel = kernel / sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fbf::params::SimpleCellParams;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn unit_gaussian_sums_to_one_and_peaks_at_center() {
        for spread in [0.5, 1.3, 1.875, 4.0] {
            let g = unit_gaussian(spread, 6);
            assert!(approx_eq(g.sum(), 1.0, 1e-4), "spread {spread}: {}", g.sum());
            assert_eq!(g.argmax(), Some((6, 6)));
            assert!(g.data().iter().all(|v| v.is_finite() && *v >= 0.0));
        }
    }

    #[test]
    fn shunting_denominator_sums_to_c_plus_e() {
        let p = ShuntingParams::default();
        let (center, surround) = shunting_gaussians(&p);
        assert_eq!(center.shape(), surround.shape());
        let denom = center.try_add(&surround).unwrap();
        assert!(approx_eq(denom.sum(), p.c + p.e, 1e-3));
    }

    #[test]
    fn half_ellipse_halves_mirror_each_other() {
        let field = SimpleCellParams::default().fine;
        for o in Orientation::all() {
            let left = half_ellipse(&field, o, Side::Left);
            let right = half_ellipse(&field, o, Side::Right);
            assert_eq!(left.sum(), right.sum(), "θ#{}", o.index());
            // Point symmetry about the center swaps the halves.
            assert_eq!(left.flipped(), right, "θ#{}", o.index());
        }
    }

    #[test]
    fn vertical_half_ellipse_splits_columns() {
        let field = SimpleCellParams::default().fine;
        let left = half_ellipse(&field, Orientation::VERTICAL, Side::Left);
        let c = field.extent() / 2;
        assert_eq!(left.get(c, c - 3), Some(1.0));
        assert_eq!(left.get(c, c + 3), Some(0.0));
        // Elongated along rows.
        assert_eq!(left.get(c - 9, c), Some(1.0));
        assert_eq!(left.get(c, c - 9), Some(0.0));
    }

    #[test]
    fn simple_kernel_sums_to_minus_one() {
        let params = SimpleCellParams::default();
        for field in [params.fine, params.coarse] {
            for o in Orientation::all() {
                for side in [Side::Left, Side::Right] {
                    let k = simple_cell_kernel(&field, params.beta, o, side);
                    assert_eq!(k.shape(), (field.extent(), field.extent()));
                    assert!(approx_eq(k.sum(), -1.0, 1e-4));
                }
            }
        }
    }

    #[test]
    fn competition_kernel_is_normalized_with_cleared_band() {
        for size in [8, 16] {
            for o in Orientation::all() {
                let k = competition_kernel(size, o);
                assert!(approx_eq(k.sum(), 1.0, 1e-4), "size {size} θ#{}", o.index());
                let c = size / 2;
                assert_eq!(k.get(c, c), Some(0.0));
            }
        }
        let horizontal = competition_kernel(8, Orientation::HORIZONTAL);
        assert!(horizontal.row(4).iter().all(|&v| v == 0.0));
        assert!(horizontal.row(3).iter().all(|&v| v > 0.0));
    }
}
