//! Pipeline observer: hooks for timing and telemetry.
//!
//! Observers are notified at stage boundaries without coupling to stage
//! logic. The runner always measures wall-clock time per stage; observers
//! receive the same measurement.

use std::time::{Duration, Instant};

/// Identification stage (the `extraction_time` of the report)
pub const STAGE_IDENTIFY: &str = "identify";
/// Keyword extraction stage
pub const STAGE_KEYWORDS: &str = "keywords";
/// Extractive summary stage
pub const STAGE_CLASSIC: &str = "classic";
/// Abstractive summary stage
pub const STAGE_NEURAL: &str = "neural";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Receives stage boundary notifications
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _elapsed: Duration) {}
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Records every finished stage in order
#[derive(Debug, Clone, Default)]
pub struct StageRecorder {
    pub stages: Vec<(&'static str, Duration)>,
}

impl PipelineObserver for StageRecorder {
    fn on_stage_end(&mut self, stage: &'static str, elapsed: Duration) {
        self.stages.push((stage, elapsed));
    }
}
