//! Message types for the application (TEA pattern)

use resopt_client::AnalysisOutcome;
use resopt_core::{ScoreKind, SelectedDocument};
use resopt_render::DialUpdate;

use crate::signals::ShutdownSignal;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // File selection
    // ─────────────────────────────────────────────────────────
    /// File chosen through the picker
    SelectFile(SelectedDocument),

    /// File dropped onto the dropzone
    DropFile(SelectedDocument),

    /// Remove the selected file
    ClearFile,

    // ─────────────────────────────────────────────────────────
    // Form input
    // ─────────────────────────────────────────────────────────
    SetJobTitle(String),
    SetJobDescription(String),
    SetCompanyName(String),
    SetAutoApply(bool),

    // ─────────────────────────────────────────────────────────
    // Submission lifecycle
    // ─────────────────────────────────────────────────────────
    /// Submit control activated
    SubmitRequested,

    /// Kick off the simulated progress timeline
    StartProgress,

    /// Stage timer fired for the given run
    AdvanceStage { run: u64 },

    /// The analysis request completed
    AnalysisFinished {
        submission: u64,
        outcome: AnalysisOutcome,
    },

    // ─────────────────────────────────────────────────────────
    // Score animation
    // ─────────────────────────────────────────────────────────
    /// Deferred dial change from an animation task
    Dial {
        submission: u64,
        kind: ScoreKind,
        update: DialUpdate,
    },

    /// A dial animation finished
    DialSettled { submission: u64, kind: ScoreKind },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Back to the upload view, keeping the file and form
    Retry,

    /// Back to the upload view with a cleared file and form
    Restart,

    /// Quit the application
    Quit,

    /// Termination signal from the OS; any outstanding request is abandoned
    Interrupted(ShutdownSignal),
}
