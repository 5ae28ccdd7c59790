//! The rendering target as an injectable interface
//!
//! Controllers never touch a concrete UI toolkit. They drive a [`ViewSink`],
//! which the headless runner backs with the in-memory [`Page`](crate::Page)
//! and tests back with either a `Page` or a mock.

use resopt_core::{ScoreKind, StageStatus, ViewSection};

use crate::score::Tier;

/// Content slots that receive text or pre-sanitized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    LoadingTitle,
    SelectedFileName,
    ResultsSummary,
    OverallSummary,
    AutoApplyNote,
    AtsWarnings,
    GapAnalysis,
    SuggestionCount,
    Suggestions,
    InterviewQuestions,
    CoverLetter,
    Downloads,
    ErrorMessage,
}

/// Panels whose visibility is toggled independently of sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Empty drop target shown while no file is selected
    Dropzone,
    /// Selected-file chip
    FileChip,
    OverallSummary,
    AutoApplyNote,
    AtsWarnings,
    InterviewQuestions,
    CoverLetter,
    Downloads,
}

impl Panel {
    pub const CONDITIONAL_RESULT_PANELS: [Panel; 6] = [
        Panel::OverallSummary,
        Panel::AutoApplyNote,
        Panel::AtsWarnings,
        Panel::InterviewQuestions,
        Panel::CoverLetter,
        Panel::Downloads,
    ];
}

/// Interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Submit,
    FileInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A single change to a score dial.
#[derive(Debug, Clone, PartialEq)]
pub enum DialUpdate {
    /// Tier color applied to the ring and value
    Tier(Tier),
    /// Ring stroke offset; the visible arc is `circumference - dash_offset`
    Stroke { dash_offset: f64 },
    /// Counter text
    Value(String),
}

/// Rendering target.
pub trait ViewSink {
    fn set_section_visible(&mut self, section: ViewSection, visible: bool);

    /// Restart the section's entrance animation.
    fn replay_entrance(&mut self, section: ViewSection);

    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    /// Insert plain text; the sink never interprets it as markup.
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Insert markup that has already been escaped/sanitized.
    fn set_html(&mut self, slot: Slot, html: &str);

    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    fn set_control_enabled(&mut self, control: Control, enabled: bool);

    /// Reset a control's underlying value (e.g. the file picker).
    fn reset_control(&mut self, control: Control);

    fn set_stage(&mut self, index: usize, label: &str, status: StageStatus);

    fn update_dial(&mut self, kind: ScoreKind, update: DialUpdate);

    /// Blocking user-facing notice.
    fn alert(&mut self, message: &str);
}
