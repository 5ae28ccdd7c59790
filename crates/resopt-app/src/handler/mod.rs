//! Handler module - TEA update function
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch

pub(crate) mod update;


use std::time::Duration;

use resopt_core::AnalysisRequest;
use resopt_render::ScoreAnimation;

use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Send the analysis request on a background task
    SubmitAnalysis {
        submission: u64,
        request: AnalysisRequest,
    },

    /// Post `AdvanceStage { run }` after `delay`
    ScheduleStageAdvance { run: u64, delay: Duration },

    /// Run the deferred half of each dial animation
    AnimateScores {
        submission: u64,
        animations: Vec<ScoreAnimation>,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
