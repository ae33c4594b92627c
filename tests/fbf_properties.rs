mod common;

use common::init_logging;
use cortex_vision::angle::Orientation;
use cortex_vision::fbf::{MemorySink, Side, SimpleCell};
use cortex_vision::stimulus::{add_noise, oriented_step, random_mondrian};
use cortex_vision::{Fbf, FbfParams, Grid, Scale};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

#[test]
fn uniform_fields_silence_simple_cells() {
    init_logging();
    for level in [0.0, 0.3, 1.0, 40.0] {
        let input = Grid::filled(24, 24, level);
        for scale in [1u8, 2] {
            for o in Orientation::all() {
                for side in Side::BOTH {
                    let out = SimpleCell::new(o, scale, side).unwrap().apply(&input).unwrap();
                    assert!(
                        out.data().iter().all(|&v| v == 0.0),
                        "level {level}, scale {scale}, θ#{}, {side:?}",
                        o.index()
                    );
                }
            }
        }
    }
}

#[test]
fn unit_range_uniform_fields_produce_no_boundaries() {
    init_logging();
    let fbf = Fbf::new(FbfParams::default()).unwrap();
    for level in [0.0, 0.3, 1.0] {
        let out = fbf.apply(&Grid::filled(24, 24, level), None).unwrap();
        for b in &out.boundaries {
            assert!(
                b.strength.data().iter().all(|&v| v == 0.0),
                "level {level}, scale {}: max {}",
                b.scale.level(),
                b.strength.max()
            );
        }
    }
}

#[test]
fn complex_energy_is_tuned_to_step_orientation() {
    init_logging();
    let fbf = Fbf::new(FbfParams::default().with_scales(&[1])).unwrap();
    for k in 0..4 {
        let phi = k as f32 * FRAC_PI_4;
        let input = oriented_step(32, 32, phi, 0.0, 1.0);
        let illuminant = fbf.discount_illuminant(&input).unwrap();
        let complex = fbf.complex_maps(Scale::Fine, &illuminant).unwrap();

        let energy: Vec<f32> = complex
            .iter()
            .map(|g| {
                (12..20)
                    .flat_map(|r| g.row(r)[12..20].iter())
                    .sum::<f32>()
            })
            .collect();
        let best = (0..energy.len())
            .max_by(|&a, &b| energy[a].total_cmp(&energy[b]))
            .unwrap();
        let tuned = Orientation::nearest(phi);
        assert_eq!(best, tuned.index(), "φ = {phi}: energy {energy:?}");
        assert!(energy[tuned.index()] > energy[tuned.orthogonal().index()]);
    }
}

#[test]
fn winner_majority_follows_step_orientation() {
    init_logging();
    let fbf = Fbf::new(FbfParams::default().with_scales(&[1])).unwrap();
    for phi in [0.0, FRAC_PI_4, FRAC_PI_2, 3.0 * FRAC_PI_4] {
        let out = fbf.apply(&oriented_step(32, 32, phi, 0.0, 1.0), None).unwrap();
        let b = out.boundary(Scale::Fine).unwrap();
        let mut votes = [0usize; 8];
        for r in 8..24 {
            for c in 8..24 {
                if b.strength.get(r, c).unwrap_or(0.0) > 0.0 {
                    if let Some(o) = b.winner_at(r, c) {
                        votes[o.index()] += 1;
                    }
                }
            }
        }
        let mode = (0..8).max_by_key(|&i| votes[i]).unwrap();
        assert_eq!(mode, Orientation::nearest(phi).index(), "φ = {phi}: {votes:?}");
    }
}

#[test]
fn every_stage_is_rectified_on_random_scenes() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(42);
    let mut input = random_mondrian(28, 36, 12, &mut rng);
    add_noise(&mut input, 0.05, &mut rng).unwrap();

    let fbf = Fbf::new(FbfParams::default()).unwrap();
    let sink = MemorySink::new();
    let out = fbf.apply(&input, Some(&sink)).unwrap();

    for (name, grid) in sink.into_inner() {
        if name.starts_with("shunting") {
            continue;
        }
        assert_eq!(grid.shape(), (28, 36), "{name}");
        assert!(
            grid.data().iter().all(|&v| v >= 0.0 && v.is_finite()),
            "{name} has a negative or non-finite sample"
        );
    }
    for b in &out.boundaries {
        assert_eq!(b.winner.len(), 28 * 36);
        assert!(b.strength.data().iter().all(|&v| v >= 0.0));
    }
}

#[test]
fn shunting_output_is_bounded() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(3);
    let input = random_mondrian(20, 20, 6, &mut rng) * 255.0;
    let fbf = Fbf::new(FbfParams::default()).unwrap();
    let illuminant = fbf.discount_illuminant(&input).unwrap();
    // On-cells lie in (−D, B) and off-cells in (−B, D + S).
    assert!(illuminant.on.data().iter().all(|v| v.abs() <= 1.0));
    assert!(illuminant.off.data().iter().all(|v| v.abs() <= 1.0));
}

#[test]
fn runs_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(11);
    let input = random_mondrian(24, 24, 5, &mut rng);
    let fbf = Fbf::new(FbfParams::default()).unwrap();
    let a = fbf.apply(&input, None).unwrap();
    let b = fbf.apply(&input, None).unwrap();
    for (x, y) in a.boundaries.iter().zip(&b.boundaries) {
        assert_eq!(x.strength, y.strength);
        assert_eq!(x.winner, y.winner);
    }
}
