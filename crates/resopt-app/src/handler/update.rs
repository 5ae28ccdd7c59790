//! Main update function - handles state transitions (TEA pattern)

use resopt_client::AnalysisOutcome;
use resopt_core::prelude::*;
use resopt_core::{AnalysisRequest, RequestFields, SelectedDocument, ViewSection};
use resopt_render::{Control, Slot, ViewSink};

use super::{UpdateAction, UpdateResult};
use crate::message::Message;
use crate::progress::StageTimer;
use crate::state::AppState;

/// Process a message and update state
pub fn update(state: &mut AppState, sink: &mut dyn ViewSink, message: Message) -> UpdateResult {
    match message {
        Message::SelectFile(document) | Message::DropFile(document) => {
            handle_select_file(state, sink, document)
        }

        Message::ClearFile => {
            state.files.clear(sink);
            UpdateResult::none()
        }

        Message::SetJobTitle(text) => {
            state.form.job_title = text;
            UpdateResult::none()
        }

        Message::SetJobDescription(text) => {
            state.form.job_description = text;
            UpdateResult::none()
        }

        Message::SetCompanyName(text) => {
            state.form.company_name = text;
            UpdateResult::none()
        }

        Message::SetAutoApply(enabled) => {
            state.form.auto_apply = enabled;
            UpdateResult::none()
        }

        Message::SubmitRequested => handle_submit(state, sink),

        Message::StartProgress => schedule(state.progress.start(sink)),

        Message::AdvanceStage { run } => schedule(state.progress.advance(run, sink)),

        Message::AnalysisFinished {
            submission,
            outcome,
        } => handle_analysis_finished(state, sink, submission, outcome),

        Message::Dial {
            submission,
            kind,
            update,
        } => {
            if submission == state.submission {
                sink.update_dial(kind, update);
            }
            UpdateResult::none()
        }

        Message::DialSettled { submission, kind } => {
            if submission == state.submission {
                state.pending_animations = state.pending_animations.saturating_sub(1);
                trace!("Dial {:?} settled", kind);
            }
            UpdateResult::none()
        }

        Message::Retry => {
            if leave_outcome(state, sink, "retry") {
                debug!("Retrying with the previous inputs");
            }
            UpdateResult::none()
        }

        Message::Restart => {
            if leave_outcome(state, sink, "restart") {
                state.files.clear(sink);
                state.form = RequestFields::default();
            }
            UpdateResult::none()
        }

        Message::Quit => {
            quit(state);
            UpdateResult::none()
        }

        Message::Interrupted(signal) => {
            if state.in_flight {
                warn!(
                    "{} while submission {} was in flight, abandoning it",
                    signal, state.submission
                );
            } else {
                info!("{} received", signal);
            }
            quit(state);
            UpdateResult::none()
        }
    }
}

fn quit(state: &mut AppState) {
    state.progress.stop();
    state.request_quit();
}

fn raise_alert(state: &mut AppState, sink: &mut dyn ViewSink, message: String) {
    sink.alert(&message);
    state.alerts.push(message);
}

fn schedule(timer: Option<StageTimer>) -> UpdateResult {
    match timer {
        Some(StageTimer { run, delay }) => {
            UpdateResult::action(UpdateAction::ScheduleStageAdvance { run, delay })
        }
        None => UpdateResult::none(),
    }
}

/// Drop the shown outcome and return to the upload view. Only valid from the
/// results or error view once the request has finished.
fn leave_outcome(state: &mut AppState, sink: &mut dyn ViewSink, command: &str) -> bool {
    let section = state.section.current();
    let on_outcome = matches!(section, ViewSection::Results | ViewSection::Error);
    if state.in_flight || !on_outcome {
        debug!("Ignoring {} in {} (in flight: {})", command, section, state.in_flight);
        return false;
    }

    state.last_result = None;
    state.last_failure = None;
    state.last_downloads.clear();
    state.section.show(ViewSection::Upload, sink);
    true
}

fn handle_select_file(
    state: &mut AppState,
    sink: &mut dyn ViewSink,
    document: SelectedDocument,
) -> UpdateResult {
    if let Err(e) = state.files.select(document, sink) {
        raise_alert(state, sink, e.to_string());
    }
    UpdateResult::none()
}

fn handle_submit(state: &mut AppState, sink: &mut dyn ViewSink) -> UpdateResult {
    if state.in_flight {
        debug!("Submission {} still in flight, ignoring submit", state.submission);
        return UpdateResult::none();
    }

    let request = match AnalysisRequest::new(&state.form, state.files.selected()) {
        Ok(request) => request,
        Err(e) => {
            debug!("Submission refused: {}", e);
            raise_alert(state, sink, e.to_string());
            return UpdateResult::none();
        }
    };

    state.submission += 1;
    state.in_flight = true;
    state.pending_animations = 0;
    state.last_failure = None;

    sink.set_control_enabled(Control::Submit, false);
    state.section.show(ViewSection::Loading, sink);

    info!(
        "Submission {} for {:?}",
        state.submission,
        request.document().name
    );

    UpdateResult {
        message: Some(Message::StartProgress),
        action: Some(UpdateAction::SubmitAnalysis {
            submission: state.submission,
            request,
        }),
    }
}

fn handle_analysis_finished(
    state: &mut AppState,
    sink: &mut dyn ViewSink,
    submission: u64,
    outcome: AnalysisOutcome,
) -> UpdateResult {
    if submission != state.submission {
        warn!("Dropping outcome of superseded submission {}", submission);
        return UpdateResult::none();
    }

    state.in_flight = false;
    sink.set_control_enabled(Control::Submit, true);
    state.progress.stop();

    match outcome {
        Ok(result) => {
            let output = state.renderer.render(&result, sink);
            state.section.show(ViewSection::Results, sink);

            state.pending_animations = output.animations.len();
            state.last_downloads = output.downloads;
            state.last_result = Some(result);

            UpdateResult::action(UpdateAction::AnimateScores {
                submission,
                animations: output.animations,
            })
        }
        Err(failure) => {
            sink.set_text(Slot::ErrorMessage, &failure.message);
            state.section.show(ViewSection::Error, sink);
            state.last_failure = Some(failure);
            UpdateResult::none()
        }
    }
}
