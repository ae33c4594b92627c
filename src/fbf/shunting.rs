//! Illuminant discounting with on/off shunting cells.
//!
//! Both polarities share the denominator `I ⊛ (G_c + G_e) + A`; they differ
//! only in the sign of the center-surround numerator and in the resting
//! level `A·S` added to the off-cell numerator.
use super::kernels::shunting_gaussians;
use super::params::ShuntingParams;
use crate::error::Result;
use crate::grid::Grid;

/// Contrast polarity of a shunting cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Excited by a bright center on a darker surround.
    On,
    /// Excited by a dark center on a brighter surround.
    Off,
}

impl Polarity {
    pub fn label(self) -> &'static str {
        match self {
            Polarity::On => "on",
            Polarity::Off => "off",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShuntingCell {
    polarity: Polarity,
    numerator: Grid,
    denominator: Grid,
    numerator_offset: f32,
    denominator_offset: f32,
}

impl ShuntingCell {
    pub fn new(polarity: Polarity, params: &ShuntingParams) -> Result<Self> {
        params.validate()?;
        let (center, surround) = shunting_gaussians(params);
        let excitatory = (&center * params.b).try_sub(&(&surround * params.d))?;
        let (numerator, numerator_offset) = match polarity {
            Polarity::On => (excitatory, 0.0),
            Polarity::Off => (-excitatory, params.a * params.s),
        };
        let denominator = center.try_add(&surround)?;
        Ok(Self {
            polarity,
            numerator,
            denominator,
            numerator_offset,
            denominator_offset: params.a,
        })
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn numerator_kernel(&self) -> &Grid {
        &self.numerator
    }

    pub fn denominator_kernel(&self) -> &Grid {
        &self.denominator
    }

    /// Same-shape normalized response. The denominator stays at or above
    /// `A` for non-negative input.
    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        let numerator = input.correlate_same(&self.numerator) + self.numerator_offset;
        let denominator = input.correlate_same(&self.denominator) + self.denominator_offset;
        numerator.try_div(&denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_form(p: &ShuntingParams, v: f32, polarity: Polarity) -> f32 {
        let denom = v * (p.c + p.e) + p.a;
        match polarity {
            Polarity::On => v * (p.b * p.c - p.d * p.e) / denom,
            Polarity::Off => (v * (p.d * p.e - p.b * p.c) + p.a * p.s) / denom,
        }
    }

    #[test]
    fn constant_input_matches_closed_form() {
        let p = ShuntingParams::default();
        for polarity in [Polarity::On, Polarity::Off] {
            let cell = ShuntingCell::new(polarity, &p).unwrap();
            for v in [0.0, 0.25, 1.0, 10.0, 255.0] {
                let out = cell.apply(&Grid::filled(12, 15, v)).unwrap();
                let expected = closed_form(&p, v, polarity);
                for &got in out.data() {
                    assert!(
                        (got - expected).abs() < 1e-3,
                        "{polarity:?} v={v}: got {got}, expected {expected}"
                    );
                }
            }
        }
    }

    #[test]
    fn zero_input_gives_zero_on_and_resting_off() {
        let p = ShuntingParams::default();
        let zero = Grid::zeros(16, 16);
        let on = ShuntingCell::new(Polarity::On, &p).unwrap().apply(&zero).unwrap();
        let off = ShuntingCell::new(Polarity::Off, &p).unwrap().apply(&zero).unwrap();
        assert!(on.data().iter().all(|&v| v == 0.0));
        assert!(off.data().iter().all(|&v| (v - p.s).abs() < 1e-6));
    }

    #[test]
    fn polarities_are_sign_mirrors() {
        let p = ShuntingParams::default();
        let on = ShuntingCell::new(Polarity::On, &p).unwrap();
        let off = ShuntingCell::new(Polarity::Off, &p).unwrap();
        let sum = on
            .numerator_kernel()
            .try_add(off.numerator_kernel())
            .unwrap();
        assert!(sum.data().iter().all(|v| v.abs() < 1e-7));
        assert_eq!(on.denominator_kernel(), off.denominator_kernel());
    }

    #[test]
    fn on_cell_responds_to_a_bright_spot() {
        let p = ShuntingParams::default();
        let mut input = Grid::zeros(15, 15);
        input.set(7, 7, 1.0).unwrap();
        let out = ShuntingCell::new(Polarity::On, &p)
            .unwrap()
            .apply(&input)
            .unwrap();
        assert_eq!(out.argmax(), Some((7, 7)));
        assert!(out.get(7, 7).unwrap() > 0.0);
    }

    #[test]
    fn invalid_params_fail_at_construction() {
        let p = ShuntingParams {
            a: 0.0,
            ..Default::default()
        };
        assert!(ShuntingCell::new(Polarity::On, &p).is_err());
    }
}
