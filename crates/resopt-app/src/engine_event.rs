//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON lines.

use resopt_core::ViewSection;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────
    /// A different section is now the visible one
    SectionChanged { from: ViewSection, to: ViewSection },

    /// An alert was shown to the user
    AlertRaised { message: String },

    // ─────────────────────────────────────────────────────────
    // Submission lifecycle
    // ─────────────────────────────────────────────────────────
    /// The simulated timeline moved to a stage
    StageActivated { index: usize, label: String },

    AnalysisSucceeded { submission: u64 },

    AnalysisFailed { submission: u64, message: String },

    /// Every dial of the rendered result reached its target
    AnimationsSettled { submission: u64 },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    Shutdown,
}

impl EngineEvent {
    /// Short label for logging and serialization
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::SectionChanged { .. } => "section_changed",
            EngineEvent::AlertRaised { .. } => "alert_raised",
            EngineEvent::StageActivated { .. } => "stage_activated",
            EngineEvent::AnalysisSucceeded { .. } => "analysis_succeeded",
            EngineEvent::AnalysisFailed { .. } => "analysis_failed",
            EngineEvent::AnimationsSettled { .. } => "animations_settled",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::SectionChanged {
                from: ViewSection::Upload,
                to: ViewSection::Loading
            }
            .event_type(),
            "section_changed"
        );
        assert_eq!(
            EngineEvent::AnalysisFailed {
                submission: 1,
                message: "bad file".into()
            }
            .event_type(),
            "analysis_failed"
        );
    }
}
