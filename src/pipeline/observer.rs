//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Every method has an empty default, so an observer only
//! implements what it cares about.

use std::time::{Duration, Instant};

use super::document::Document;
use super::stage::StageKind;

// ─── StageClock ─────────────────────────────────────────────────────────────

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

// ─── StageReport ────────────────────────────────────────────────────────────

/// Outcome of one executed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Position of the stage in the sequence.
    pub index: usize,
    pub kind: StageKind,
    pub elapsed: Duration,
    /// `false` if the stage returned an error.
    pub ok: bool,
}

// ─── Observer trait ─────────────────────────────────────────────────────────

pub trait PipelineObserver {
    /// Called after validation succeeds, before the first stage runs.
    fn on_validated(&mut self, _stages: usize) {}

    fn on_stage_start(&mut self, _index: usize, _kind: StageKind) {}

    fn on_stage_end(&mut self, _report: &StageReport) {}

    /// Called once after the last stage succeeds.
    fn on_document(&mut self, _doc: &Document) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects a [`StageReport`] per executed stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<StageReport>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[StageReport] {
        &self.reports
    }

    /// Sum of all recorded stage durations.
    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|r| r.elapsed).sum()
    }

    /// The report of the stage that failed, if any.
    pub fn failed(&self) -> Option<&StageReport> {
        self.reports.iter().find(|r| !r.ok)
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, report: &StageReport) {
        self.reports.push(report.clone());
    }
}
