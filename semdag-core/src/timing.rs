//! Per-stage wall-clock timing for the pipeline.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One completed stage measurement.
#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: String,
    pub duration_secs: f64,
    /// When the stage finished.
    pub timestamp: DateTime<Utc>,
}

/// Records stage durations in execution order.
#[derive(Debug, Default)]
pub struct TimingRecorder {
    stages: Vec<StageTiming>,
}

impl TimingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, recording its wall-clock duration under `stage`.
    pub fn time<T>(&mut self, stage: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.record(stage, start);
        value
    }

    /// Record a stage measured externally from its start instant.
    pub fn record(&mut self, stage: &str, start: Instant) {
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            duration_secs: start.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
        });
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Duration of a named stage, if it was recorded.
    pub fn duration_of(&self, stage: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.duration_secs)
    }
}
