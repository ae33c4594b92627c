use crate::angle::ORIENTATION_COUNT;
use crate::diagnostics::TimingBreakdown;
use crate::fbf::ScaleBoundaries;
use serde::Serialize;

/// End-to-end trace of one boundary-pipeline run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FbfTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub scales: Vec<ScaleReport>,
    /// Name of the stage that produced the percept grid.
    pub percept_stage: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub rows: usize,
    pub cols: usize,
    pub min: f32,
    pub max: f32,
}

/// Summary of one scale's boundary-strength map.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleReport {
    pub scale: u8,
    pub max_strength: f32,
    pub mean_strength: f32,
    /// Pixels with strictly positive strength.
    pub active_pixels: usize,
    /// Winning-orientation counts over the active pixels, by orientation index.
    pub winner_histogram: [usize; ORIENTATION_COUNT],
}

impl ScaleReport {
    pub fn from_boundaries(b: &ScaleBoundaries) -> Self {
        let mut winner_histogram = [0usize; ORIENTATION_COUNT];
        let mut active_pixels = 0;
        for (&v, o) in b.strength.data().iter().zip(&b.winner) {
            if v > 0.0 {
                active_pixels += 1;
                winner_histogram[o.index()] += 1;
            }
        }
        Self {
            scale: b.scale.level(),
            max_strength: b.strength.max(),
            mean_strength: b.strength.mean(),
            active_pixels,
            winner_histogram,
        }
    }

    /// Orientation index with the most active pixels, if any are active.
    pub fn dominant_orientation(&self) -> Option<usize> {
        if self.active_pixels == 0 {
            return None;
        }
        let mut best = 0;
        for (i, &count) in self.winner_histogram.iter().enumerate() {
            if count > self.winner_histogram[best] {
                best = i;
            }
        }
        Some(best)
    }
}
