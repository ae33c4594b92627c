//! Angle utilities and the discrete orientation set of the boundary pipeline.
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, PI};

/// Number of discrete orientations sampled over `[0, π)`.
pub const ORIENTATION_COUNT: usize = 8;

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned angular difference between two line directions,
/// treating antipodal directions as equivalent (π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// One of the eight boundary orientations `θ_i = i·π/8`.
///
/// θ is the direction the boundary runs in image coordinates, measured from
/// the +column axis toward +row: `0` is a horizontal boundary, `4` (π/2) a
/// vertical one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Orientation(u8);

impl Orientation {
    pub const HORIZONTAL: Orientation = Orientation(0);
    pub const VERTICAL: Orientation = Orientation(4);

    /// `None` unless `index < 8`.
    pub fn new(index: usize) -> Option<Self> {
        (index < ORIENTATION_COUNT).then_some(Orientation(index as u8))
    }

    /// All eight orientations in index order.
    pub fn all() -> impl Iterator<Item = Orientation> + Clone {
        (0..ORIENTATION_COUNT as u8).map(Orientation)
    }

    /// Closest orientation to an arbitrary line angle (mod π).
    pub fn nearest(angle: f32) -> Self {
        Orientation::all()
            .min_by(|a, b| {
                angular_difference(a.angle(), angle).total_cmp(&angular_difference(b.angle(), angle))
            })
            .unwrap_or(Orientation::HORIZONTAL)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn angle(self) -> f32 {
        self.0 as f32 * PI / ORIENTATION_COUNT as f32
    }

    /// The orientation rotated by π/2.
    pub fn orthogonal(self) -> Self {
        Orientation((self.0 + ORIENTATION_COUNT as u8 / 2) % ORIENTATION_COUNT as u8)
    }
}
