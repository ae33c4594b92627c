mod common;

use common::init_logging;
use common::synthetic_image::checkerboard_u8;
use cortex_vision::edges::canny::EDGE_VALUE;
use cortex_vision::edges::{sobel_gradients, sparse_edges, Canny};
use cortex_vision::enhance::{binary_threshold, equalize};
use cortex_vision::features::Harris;
use cortex_vision::filters::Filter;
use cortex_vision::image::ImageU8;
use cortex_vision::interpolate::{resize, Interpolation};
use cortex_vision::transform::rotate;
use cortex_vision::Grid;
use std::f32::consts::FRAC_PI_2;

const SIZE: usize = 64;
const CELL: usize = 16;

fn checkerboard() -> Grid {
    let buffer = checkerboard_u8(SIZE, SIZE, CELL);
    ImageU8 {
        w: SIZE,
        h: SIZE,
        stride: SIZE,
        data: &buffer,
    }
    .to_unit_grid()
}

/// Distance from pixel index `i` to the nearest interior cell boundary.
fn boundary_distance(i: usize) -> f32 {
    (1..SIZE / CELL)
        .map(|k| (i as f32 - (k * CELL) as f32 + 0.5).abs())
        .fold(f32::INFINITY, f32::min)
}

#[test]
fn harris_corners_sit_on_cell_junctions() {
    init_logging();
    let harris = Harris::new(1.0, 0.05, 1.0).unwrap();
    let corners = harris.detect(&checkerboard()).unwrap();
    assert!(!corners.is_empty());
    for c in &corners {
        assert!(
            boundary_distance(c.row) <= 4.0 && boundary_distance(c.col) <= 4.0,
            "corner off junction: {c:?}"
        );
    }
    assert!(corners
        .iter()
        .any(|c| c.row.abs_diff(32) <= 2 && c.col.abs_diff(32) <= 2));
}

#[test]
fn canny_traces_cell_borders() {
    init_logging();
    let edges = Canny::new(1.0, 0.3, 0.8).unwrap().apply(&checkerboard());
    let mut count = 0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            if edges.get(r, c) == Some(EDGE_VALUE) {
                count += 1;
                assert!(
                    boundary_distance(r) <= 2.0 || boundary_distance(c) <= 2.0,
                    "stray edge at ({r}, {c})"
                );
            }
        }
    }
    // Six interior borders; junctions may open small gaps.
    assert!(count >= 6 * SIZE / 2, "only {count} edge pixels");
}

#[test]
fn sparse_edges_cover_both_directions() {
    let grad = sobel_gradients(&checkerboard());
    let edges = sparse_edges(&grad, 1.0);
    let horizontal_gradient = edges.iter().filter(|e| e.direction.cos().abs() > 0.9).count();
    let vertical_gradient = edges.iter().filter(|e| e.direction.sin().abs() > 0.9).count();
    assert!(horizontal_gradient > 0 && vertical_gradient > 0);
}

#[test]
fn quarter_turns_round_trip_with_nearest() {
    let board = checkerboard();
    let turned = rotate(&board, FRAC_PI_2, Interpolation::Nearest).unwrap();
    assert_ne!(turned, board);
    let back = rotate(&turned, -FRAC_PI_2, Interpolation::Nearest).unwrap();
    assert_eq!(back, board);
}

#[test]
fn resize_and_enhance_keep_two_levels() {
    let small = resize(&checkerboard(), 16, 16, Interpolation::Nearest).unwrap();
    let eq = equalize(&small);
    assert!(eq
        .data()
        .iter()
        .all(|&v| v == 0.0 || (v - 255.0).abs() < 1e-3));
    let bright = eq.data().iter().filter(|&&v| v > 127.0).count();
    let mask = binary_threshold(&small, 0.5);
    let foreground = mask.data().iter().filter(|&&v| v == 255.0).count();
    assert_eq!(bright, foreground);
    assert!(bright > 0 && bright < 16 * 16);
}
