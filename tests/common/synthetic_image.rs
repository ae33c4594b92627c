/// Generates an 8-bit vertical step: `low` left of column `at`, `high` from it on.
pub fn vertical_step_u8(width: usize, height: usize, at: usize, low: u8, high: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(at <= width, "step column must lie inside the image");

    let mut img = vec![low; width * height];
    for y in 0..height {
        for x in at..width {
            img[y * width + x] = high;
        }
    }
    img
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}
