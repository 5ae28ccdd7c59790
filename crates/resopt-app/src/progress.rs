//! Simulated progress timeline
//!
//! The simulator only tracks which stage is active and which run it belongs
//! to. Timing lives in spawned timer tasks that post
//! [`Message::AdvanceStage`](crate::Message::AdvanceStage); the handle of the
//! single pending timer is held here so [`ProgressSimulator::stop`] can abort
//! it.

use std::time::Duration;

use resopt_core::{ProgressStage, StageStatus, DEFAULT_STAGES, STAGE_COUNT};
use resopt_render::{Slot, ViewSink};
use tokio::task::JoinHandle;

/// A stage advancement to schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimer {
    pub run: u64,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct ProgressSimulator {
    stages: [ProgressStage; STAGE_COUNT],
    active: Option<usize>,
    run: u64,
    timer: Option<JoinHandle<()>>,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_STAGES)
    }
}

impl ProgressSimulator {
    pub fn new(stages: [ProgressStage; STAGE_COUNT]) -> Self {
        Self {
            stages,
            active: None,
            run: 0,
            timer: None,
        }
    }

    pub fn stages(&self) -> &[ProgressStage; STAGE_COUNT] {
        &self.stages
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Begin a new run: every stage pending, stage 0 active.
    pub fn start(&mut self, sink: &mut dyn ViewSink) -> Option<StageTimer> {
        self.stop();
        self.run += 1;

        for (index, stage) in self.stages.iter().enumerate() {
            sink.set_stage(index, stage.label, StageStatus::Pending);
        }

        tracing::debug!("Progress run {} started", self.run);
        self.activate(0, sink)
    }

    /// Advance to the next stage if `run` is current.
    ///
    /// The final stage is never advanced past; it stays active until
    /// [`stop`](Self::stop).
    pub fn advance(&mut self, run: u64, sink: &mut dyn ViewSink) -> Option<StageTimer> {
        if run != self.run {
            tracing::trace!("Ignoring stage advance from stale run {}", run);
            return None;
        }

        let current = self.active?;
        let next = current + 1;
        if next >= STAGE_COUNT {
            return None;
        }

        let prior = &self.stages[current];
        sink.set_stage(current, prior.label, StageStatus::Done);
        self.activate(next, sink)
    }

    fn activate(&mut self, index: usize, sink: &mut dyn ViewSink) -> Option<StageTimer> {
        let stage = &self.stages[index];
        sink.set_stage(index, stage.label, StageStatus::Active);
        sink.set_text(Slot::LoadingTitle, stage.label);
        self.active = Some(index);

        if index + 1 < STAGE_COUNT {
            Some(StageTimer {
                run: self.run,
                delay: stage.duration,
            })
        } else {
            None
        }
    }

    /// Hold the handle of the newly scheduled timer, aborting any previous one.
    pub fn arm(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.timer.replace(handle) {
            previous.abort();
        }
    }

    /// Halt advancement. Idempotent.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        if self.active.take().is_some() {
            // Invalidate advancements already queued for this run
            self.run += 1;
            tracing::debug!("Progress stopped");
        }
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
