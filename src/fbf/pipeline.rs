//! Orchestrator: shunting → simple → complex → competition → winner-take-all.
//!
//! Kernels for every `(family, θ, scale)` are built once in [`Fbf::new`] and
//! held read-only. A run allocates fresh grids per stage and keeps nothing
//! between calls. Within a scale the eight complex-cell maps are collected
//! in full before the competitive stage starts, which takes the whole
//! orientation set at once.
//!
//! With the `parallel` feature the scales run concurrently, and so do the
//! eight orientations inside a scale. Results do not depend on scheduling.
use super::complex::{ComplexCell, SimpleResponses};
use super::hypercomplex::{winner_take_all, CompetitiveStage};
use super::params::{FbfParams, Scale};
use super::percept::{PerceptStage, UnrealizedPercept};
use super::shunting::{Polarity, ShuntingCell};
use super::simple::{Side, SimpleCell};
use super::sink::DebugSink;
use crate::angle::Orientation;
use crate::diagnostics::{
    elapsed_ms, FbfTrace, InputDescriptor, ScaleReport, StageTiming, TimingBreakdown,
};
use crate::error::{Error, Result};
use crate::grid::Grid;
use log::{debug, info};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Illuminant-discounted on/off maps.
#[derive(Clone, Debug)]
pub struct Illuminant {
    pub on: Grid,
    pub off: Grid,
}

/// Boundary-strength map of one scale with the per-pixel winning orientation.
#[derive(Clone, Debug)]
pub struct ScaleBoundaries {
    pub scale: Scale,
    pub strength: Grid,
    pub winner: Vec<Orientation>,
}

impl ScaleBoundaries {
    pub fn winner_at(&self, row: usize, col: usize) -> Option<Orientation> {
        (row < self.strength.rows() && col < self.strength.cols())
            .then(|| self.winner[row * self.strength.cols() + col])
    }
}

#[derive(Clone, Debug)]
pub struct FbfOutput {
    /// One entry per configured scale, in configuration order.
    pub boundaries: Vec<ScaleBoundaries>,
    /// Output of the configured [`PerceptStage`].
    pub percept: Grid,
    pub trace: FbfTrace,
}

impl FbfOutput {
    pub fn boundary(&self, scale: Scale) -> Option<&ScaleBoundaries> {
        self.boundaries.iter().find(|b| b.scale == scale)
    }
}

struct ScaleBank {
    scale: Scale,
    /// `[left, right]` simple cells per orientation index.
    cells: Vec<[SimpleCell; 2]>,
    competition: CompetitiveStage,
}

pub struct Fbf {
    params: FbfParams,
    on: ShuntingCell,
    off: ShuntingCell,
    complex: ComplexCell,
    banks: Vec<ScaleBank>,
    percept: Box<dyn PerceptStage>,
}

impl Fbf {
    /// Validate `params` and precompute every kernel.
    pub fn new(params: FbfParams) -> Result<Self> {
        params.validate()?;
        let on = ShuntingCell::new(Polarity::On, &params.shunting)?;
        let off = ShuntingCell::new(Polarity::Off, &params.shunting)?;
        let mut banks = Vec::new();
        for scale in params.resolved_scales()? {
            let mut cells = Vec::with_capacity(Orientation::all().count());
            for o in Orientation::all() {
                cells.push([
                    SimpleCell::with_params(o, scale, Side::Left, &params.simple)?,
                    SimpleCell::with_params(o, scale, Side::Right, &params.simple)?,
                ]);
            }
            let field = params.simple.field(scale);
            let competition = CompetitiveStage::new(scale, field, &params.competition)?;
            debug!(
                "FBF scale {}: simple kernel {}x{}, competition kernel {}x{}",
                scale.level(),
                field.extent(),
                field.extent(),
                field.competition_size,
                field.competition_size
            );
            banks.push(ScaleBank {
                scale,
                cells,
                competition,
            });
        }
        Ok(Self {
            complex: ComplexCell::new(&params.complex),
            params,
            on,
            off,
            banks,
            percept: Box::new(UnrealizedPercept),
        })
    }

    /// Replace the percept stage that runs after winner-take-all.
    pub fn with_percept(mut self, stage: impl PerceptStage + 'static) -> Self {
        self.percept = Box::new(stage);
        self
    }

    pub fn params(&self) -> &FbfParams {
        &self.params
    }

    pub fn scales(&self) -> Vec<Scale> {
        self.banks.iter().map(|b| b.scale).collect()
    }

    /// Stage 1: on/off shunting cells on the raw input.
    pub fn discount_illuminant(&self, input: &Grid) -> Result<Illuminant> {
        Ok(Illuminant {
            on: self.on.apply(input)?,
            off: self.off.apply(input)?,
        })
    }

    /// Stage 2: the four simple-cell responses for one `(scale, θ)`.
    pub fn simple_responses(
        &self,
        scale: Scale,
        orientation: Orientation,
        illuminant: &Illuminant,
    ) -> Result<SimpleResponses> {
        simple_responses(self.bank(scale)?, orientation, illuminant)
    }

    /// Stages 2–3 for one `(scale, θ)`.
    pub fn complex_map(
        &self,
        scale: Scale,
        orientation: Orientation,
        illuminant: &Illuminant,
    ) -> Result<Grid> {
        self.complex_map_traced(self.bank(scale)?, orientation, illuminant, None)
    }

    /// Stages 2–3 for all eight orientations of `scale`, index-ordered.
    pub fn complex_maps(&self, scale: Scale, illuminant: &Illuminant) -> Result<Vec<Grid>> {
        let bank = self.bank(scale)?;
        map_orientations(|o| self.complex_map_traced(bank, o, illuminant, None))
    }

    /// Stages 4–5 on the eight complex-cell maps of `scale`.
    pub fn boundaries(&self, scale: Scale, complex: &[Grid]) -> Result<ScaleBoundaries> {
        let competition = self.bank(scale)?.competition.apply(complex)?;
        let wta = winner_take_all(&competition)?;
        Ok(ScaleBoundaries {
            scale,
            strength: wta.strength,
            winner: wta.winner,
        })
    }

    /// Run the whole pipeline, optionally dumping every intermediate map.
    pub fn apply(&self, input: &Grid, sink: Option<&dyn DebugSink>) -> Result<FbfOutput> {
        if input.is_empty() {
            return Err(Error::invalid(format!(
                "input grid must not be empty, got {}x{}",
                input.rows(),
                input.cols()
            )));
        }
        let start = Instant::now();
        info!(
            "FBF start: {}x{} grid, {} scale(s)",
            input.rows(),
            input.cols(),
            self.banks.len()
        );
        let mut timings = TimingBreakdown::default();

        let (illuminant, timing) =
            StageTiming::measure("shunting", || self.discount_illuminant(input));
        let illuminant = illuminant?;
        debug!("FBF shunting: {:.2} ms", timing.elapsed_ms);
        timings.stages.push(timing);
        emit(sink, "shunting_on", &illuminant.on)?;
        emit(sink, "shunting_off", &illuminant.off)?;

        let per_scale = map_banks(&self.banks, |bank| self.run_scale(bank, &illuminant, sink))?;
        let mut boundaries = Vec::with_capacity(per_scale.len());
        for (b, stage_timings) in per_scale {
            timings.extend(stage_timings);
            boundaries.push(b);
        }

        let (percept, timing) =
            StageTiming::measure("percept", || self.percept.apply(input, &boundaries));
        let percept = percept?;
        timings.stages.push(timing);
        emit(sink, "percept", &percept)?;

        timings.total_ms = elapsed_ms(start);
        info!("FBF done in {:.2} ms", timings.total_ms);
        let trace = FbfTrace {
            input: InputDescriptor {
                rows: input.rows(),
                cols: input.cols(),
                min: input.min(),
                max: input.max(),
            },
            timings,
            scales: boundaries.iter().map(ScaleReport::from_boundaries).collect(),
            percept_stage: self.percept.name().to_owned(),
        };
        Ok(FbfOutput {
            boundaries,
            percept,
            trace,
        })
    }

    fn bank(&self, scale: Scale) -> Result<&ScaleBank> {
        self.banks
            .iter()
            .find(|b| b.scale == scale)
            .ok_or_else(|| Error::invalid(format!("scale {} is not configured", scale.level())))
    }

    fn run_scale(
        &self,
        bank: &ScaleBank,
        illuminant: &Illuminant,
        sink: Option<&dyn DebugSink>,
    ) -> Result<(ScaleBoundaries, Vec<StageTiming>)> {
        let k = bank.scale.level();

        let (complex, t_complex) = StageTiming::measure(format!("complex s{k}"), || {
            map_orientations(|o| self.complex_map_traced(bank, o, illuminant, sink))
        });
        let complex = complex?;

        let (competition, t_competition) =
            StageTiming::measure(format!("competition s{k}"), || bank.competition.apply(&complex));
        let competition = competition?;
        for (o, map) in Orientation::all().zip(&competition) {
            emit(sink, &format!("competition_s{k}_o{}", o.index()), map)?;
        }

        let (wta, t_wta) =
            StageTiming::measure(format!("winner-take-all s{k}"), || winner_take_all(&competition));
        let wta = wta?;
        emit(sink, &format!("boundary_s{k}"), &wta.strength)?;

        debug!(
            "FBF scale {k}: complex {:.2} ms, competition {:.2} ms, max boundary {:.4}",
            t_complex.elapsed_ms,
            t_competition.elapsed_ms,
            wta.strength.max()
        );
        Ok((
            ScaleBoundaries {
                scale: bank.scale,
                strength: wta.strength,
                winner: wta.winner,
            },
            vec![t_complex, t_competition, t_wta],
        ))
    }

    fn complex_map_traced(
        &self,
        bank: &ScaleBank,
        orientation: Orientation,
        illuminant: &Illuminant,
        sink: Option<&dyn DebugSink>,
    ) -> Result<Grid> {
        let responses = simple_responses(bank, orientation, illuminant)?;
        let (k, i) = (bank.scale.level(), orientation.index());
        if sink.is_some() {
            for (label, grid) in [
                ("on_left", &responses.on_left),
                ("on_right", &responses.on_right),
                ("off_left", &responses.off_left),
                ("off_right", &responses.off_right),
            ] {
                emit(sink, &format!("simple_{label}_s{k}_o{i}"), grid)?;
            }
        }
        let complex = self.complex.apply(&responses)?;
        emit(sink, &format!("complex_s{k}_o{i}"), &complex)?;
        Ok(complex)
    }
}

fn simple_responses(
    bank: &ScaleBank,
    orientation: Orientation,
    illuminant: &Illuminant,
) -> Result<SimpleResponses> {
    let [left, right] = &bank.cells[orientation.index()];
    Ok(SimpleResponses {
        on_left: left.apply(&illuminant.on)?,
        on_right: right.apply(&illuminant.on)?,
        off_left: left.apply(&illuminant.off)?,
        off_right: right.apply(&illuminant.off)?,
    })
}

fn emit(sink: Option<&dyn DebugSink>, name: &str, grid: &Grid) -> Result<()> {
    match sink {
        Some(sink) => sink.save(name, grid, true),
        None => Ok(()),
    }
}

#[cfg(feature = "parallel")]
fn map_orientations<T, F>(f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(Orientation) -> Result<T> + Send + Sync,
{
    let all: Vec<Orientation> = Orientation::all().collect();
    all.into_par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_orientations<T, F>(f: F) -> Result<Vec<T>>
where
    F: Fn(Orientation) -> Result<T>,
{
    Orientation::all().map(f).collect()
}

#[cfg(feature = "parallel")]
fn map_banks<T, F>(banks: &[ScaleBank], f: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&ScaleBank) -> Result<T> + Send + Sync,
{
    banks.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_banks<T, F>(banks: &[ScaleBank], f: F) -> Result<Vec<T>>
where
    F: Fn(&ScaleBank) -> Result<T>,
{
    banks.iter().map(f).collect()
}
