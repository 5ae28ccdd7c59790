//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use resopt_client::{AnalysisClient, AnalysisTransport};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::handler::UpdateAction;
use crate::message::Message;

pub(crate) mod analysis;
pub(crate) mod animation;
pub(crate) mod progress;

/// Execute an action by spawning a background task.
///
/// Returns the handle of a spawned stage timer so the caller can hand it to
/// the progress simulator; other tasks run detached.
pub fn handle_action<T>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    client: &Arc<AnalysisClient<T>>,
) -> Option<JoinHandle<()>>
where
    T: AnalysisTransport + Sync + 'static,
{
    match action {
        UpdateAction::SubmitAnalysis {
            submission,
            request,
        } => {
            analysis::spawn_analysis(submission, request, Arc::clone(client), msg_tx);
            None
        }

        UpdateAction::ScheduleStageAdvance { run, delay } => {
            Some(progress::spawn_stage_timer(run, delay, msg_tx))
        }

        UpdateAction::AnimateScores {
            submission,
            animations,
        } => {
            for animation in animations {
                animation::spawn_dial_animation(submission, animation, msg_tx.clone());
            }
            None
        }
    }
}
