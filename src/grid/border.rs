//! Out-of-range index resolution for neighborhood operators.

/// How samples outside the grid are produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BorderMode {
    /// Every outside sample reads the given value (zero padding when `0.0`).
    Constant(f32),
    /// Replicate the nearest edge sample.
    Clamp,
    /// Mirror without repeating the edge sample: `.. 2 1 | 0 1 2 .. n-1 | n-2 ..`.
    Reflect101,
}

/// Map a possibly out-of-range index into `[0, len)`.
///
/// Returns `None` for `Constant` borders when `i` is outside, and for empty axes.
#[inline]
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }
    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { 2 * len - 2 - r })
        }
    }
}
