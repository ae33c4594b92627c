use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Receptive-field scale of the oriented cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Scale {
    /// Level 1: small receptive fields.
    Fine,
    /// Level 2: large receptive fields.
    Coarse,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::Fine, Scale::Coarse];

    /// Map a scale level (`1` or `2`) onto a `Scale`.
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            1 => Ok(Scale::Fine),
            2 => Ok(Scale::Coarse),
            other => Err(Error::invalid(format!(
                "scale must be 1 or 2, got {other}"
            ))),
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Scale::Fine => 1,
            Scale::Coarse => 2,
        }
    }
}

/// Constants of the on/off shunting (divisive normalization) cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuntingParams {
    /// Additive floor of the denominator; keeps it strictly positive.
    pub a: f32,
    /// Gain of the center Gaussian in the numerator.
    pub b: f32,
    /// Amplitude of the center Gaussian.
    pub c: f32,
    /// Gain of the surround Gaussian in the numerator.
    pub d: f32,
    /// Amplitude of the surround Gaussian.
    pub e: f32,
    /// Resting level added to the off-cell numerator (scaled by `a`).
    pub s: f32,
    /// Spread of the center Gaussian.
    pub alpha: f32,
    /// Spread of the surround Gaussian.
    pub beta: f32,
}

impl Default for ShuntingParams {
    fn default() -> Self {
        Self {
            a: 134.0,
            b: 1.0,
            c: 7.0,
            d: 0.5,
            e: 3.333,
            s: 0.2,
            alpha: 1.3,
            beta: 1.875,
        }
    }
}

impl ShuntingParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.a > 0.0) {
            return Err(Error::invalid("shunting A must be positive"));
        }
        if !(self.alpha > 0.0 && self.beta > 0.0) {
            return Err(Error::invalid("shunting spreads must be positive"));
        }
        if self.c < 0.0 || self.e < 0.0 {
            return Err(Error::invalid("shunting amplitudes must be non-negative"));
        }
        Ok(())
    }

    /// Half-width shared by the center and surround kernels.
    pub fn kernel_radius(&self) -> usize {
        (3.0 * self.alpha.max(self.beta)).ceil() as usize
    }
}

/// Per-scale geometry of the oriented cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReceptiveField {
    /// Semi-axis of the half-ellipse along the boundary direction.
    pub major: usize,
    /// Semi-axis across the boundary direction.
    pub minor: usize,
    /// Weight of the opposing half in the simple-cell kernel; must exceed 1.
    pub alpha: f32,
    /// Side length of the square competition kernel.
    pub competition_size: usize,
}

impl ReceptiveField {
    /// Odd side length of the half-ellipse kernel, `⌊1.8·major⌋ | 1`.
    ///
    /// Rounding up to odd keeps the kernel centered on its anchor, so scale 2
    /// uses 37 rather than `⌊1.8·20⌋ = 36`.
    pub fn extent(&self) -> usize {
        (self.major * 9 / 5) | 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleCellParams {
    pub fine: ReceptiveField,
    pub coarse: ReceptiveField,
    /// Noise floor subtracted from every kernel tap.
    pub beta: f32,
}

impl Default for SimpleCellParams {
    fn default() -> Self {
        Self {
            fine: ReceptiveField {
                major: 12,
                minor: 6,
                alpha: 1.4,
                competition_size: 8,
            },
            coarse: ReceptiveField {
                major: 20,
                minor: 10,
                alpha: 2.0,
                competition_size: 16,
            },
            beta: 0.012,
        }
    }
}

impl SimpleCellParams {
    pub fn field(&self, scale: Scale) -> &ReceptiveField {
        match scale {
            Scale::Fine => &self.fine,
            Scale::Coarse => &self.coarse,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for scale in Scale::ALL {
            let f = self.field(scale);
            if f.minor == 0 || f.major < f.minor {
                return Err(Error::invalid(format!(
                    "scale {}: need major >= minor >= 1, got {}x{}",
                    scale.level(),
                    f.major,
                    f.minor
                )));
            }
            if !(f.alpha > 1.0) {
                return Err(Error::invalid(format!(
                    "scale {}: simple-cell alpha must exceed 1, got {}",
                    scale.level(),
                    f.alpha
                )));
            }
            if f.competition_size == 0 {
                return Err(Error::invalid("competition kernel size must be positive"));
            }
        }
        if self.beta < 0.0 {
            return Err(Error::invalid("simple-cell beta must be non-negative"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexCellParams {
    /// Gain applied to the pooled simple-cell responses.
    pub f: f32,
}

impl Default for ComplexCellParams {
    fn default() -> Self {
        Self { f: 0.5 }
    }
}

/// Constants of the first competitive (hypercomplex) stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionParams {
    /// Additive floor of the denominator.
    pub epsilon: f32,
    /// Weight of the pooled neighborhood in the denominator.
    pub mu: f32,
    /// Threshold subtracted after normalization.
    pub tau: f32,
}

impl Default for CompetitionParams {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            mu: 0.1,
            tau: 0.1,
        }
    }
}

impl CompetitionParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon > 0.0) {
            return Err(Error::invalid("competition epsilon must be positive"));
        }
        if self.mu < 0.0 {
            return Err(Error::invalid("competition mu must be non-negative"));
        }
        Ok(())
    }
}

/// Full configuration of the boundary pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbfParams {
    pub shunting: ShuntingParams,
    pub simple: SimpleCellParams,
    pub complex: ComplexCellParams,
    pub competition: CompetitionParams,
    /// Scale levels to evaluate, each `1` or `2`.
    pub scales: Vec<u8>,
}

impl Default for FbfParams {
    fn default() -> Self {
        Self {
            shunting: ShuntingParams::default(),
            simple: SimpleCellParams::default(),
            complex: ComplexCellParams::default(),
            competition: CompetitionParams::default(),
            scales: vec![1, 2],
        }
    }
}

impl FbfParams {
    pub fn with_scales(mut self, scales: &[u8]) -> Self {
        self.scales = scales.to_vec();
        self
    }

    pub fn with_shunting(mut self, shunting: ShuntingParams) -> Self {
        self.shunting = shunting;
        self
    }

    pub fn with_simple(mut self, simple: SimpleCellParams) -> Self {
        self.simple = simple;
        self
    }

    pub fn with_competition(mut self, competition: CompetitionParams) -> Self {
        self.competition = competition;
        self
    }

    /// Resolve `scales` into distinct `Scale` values, in the given order.
    pub fn resolved_scales(&self) -> Result<Vec<Scale>> {
        if self.scales.is_empty() {
            return Err(Error::invalid("at least one scale is required"));
        }
        let mut out: Vec<Scale> = Vec::with_capacity(self.scales.len());
        for &level in &self.scales {
            let scale = Scale::from_level(level)?;
            if out.contains(&scale) {
                return Err(Error::invalid(format!("scale {level} listed twice")));
            }
            out.push(scale);
        }
        Ok(out)
    }

    pub fn validate(&self) -> Result<()> {
        self.shunting.validate()?;
        self.simple.validate()?;
        self.competition.validate()?;
        self.resolved_scales().map(|_| ())
    }
}
