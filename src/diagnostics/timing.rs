use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }

    /// Run `f` and record how long it took.
    pub fn measure<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> (T, Self) {
        let start = Instant::now();
        let value = f();
        (value, Self::new(label, elapsed_ms(start)))
    }
}

/// Timing trace of one pipeline run. Stages run concurrently under the
/// `parallel` feature, so `total_ms` can be below the sum of the stages.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn extend(&mut self, stages: impl IntoIterator<Item = StageTiming>) {
        self.stages.extend(stages);
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_returns_value_and_label() {
        let (v, timing) = StageTiming::measure("square", || 7 * 7);
        assert_eq!(v, 49);
        assert_eq!(timing.label, "square");
        assert!(timing.elapsed_ms >= 0.0);
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let mut t = TimingBreakdown::default();
        t.push("shunting", 1.5);
        t.extend([StageTiming::new("percept", 0.25)]);
        assert_eq!(t.stage_ms("percept"), Some(0.25));
        assert_eq!(t.stage_ms("missing"), None);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"totalMs\""));
        assert!(json.contains("\"elapsedMs\":1.5"));
    }
}
