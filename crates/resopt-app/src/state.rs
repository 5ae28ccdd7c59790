//! Application state (Model in TEA pattern)

use resopt_client::AnalysisFailure;
use resopt_core::{AnalysisResult, ProgressStage, RequestFields, DEFAULT_STAGES, STAGE_COUNT};
use resopt_render::{ArtifactLink, RenderOptions, ResultRenderer};

use crate::file_selection::FileSelectionManager;
use crate::progress::ProgressSimulator;
use crate::section::SectionController;

/// Session state, mutated only through [`handler::update`](crate::handler::update).
#[derive(Debug)]
pub struct AppState {
    pub section: SectionController,
    pub files: FileSelectionManager,
    pub form: RequestFields,
    pub progress: ProgressSimulator,
    pub renderer: ResultRenderer,

    /// Number of the latest submission; animation messages carry it
    pub submission: u64,

    /// A request is outstanding
    pub in_flight: bool,

    /// Dial animations of the latest result still running
    pub pending_animations: usize,

    pub last_result: Option<AnalysisResult>,
    pub last_failure: Option<AnalysisFailure>,
    pub last_downloads: Vec<ArtifactLink>,

    /// Alerts raised so far, most recent last
    pub alerts: Vec<String>,

    quitting: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_STAGES, RenderOptions::default())
    }
}

impl AppState {
    pub fn new(stages: [ProgressStage; STAGE_COUNT], render: RenderOptions) -> Self {
        Self {
            section: SectionController::default(),
            files: FileSelectionManager::default(),
            form: RequestFields::default(),
            progress: ProgressSimulator::new(stages),
            renderer: ResultRenderer::new(render),
            submission: 0,
            in_flight: false,
            pending_animations: 0,
            last_result: None,
            last_failure: None,
            last_downloads: Vec::new(),
            alerts: Vec::new(),
            quitting: false,
        }
    }

    /// No request outstanding and no dial still animating
    pub fn is_settled(&self) -> bool {
        !self.in_flight && self.pending_animations == 0
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resopt_core::ViewSection;

    #[test]
    fn test_new_state_is_settled_on_upload() {
        let state = AppState::default();
        assert!(state.is_settled());
        assert!(!state.should_quit());
        assert_eq!(state.section.current(), ViewSection::Upload);
        assert_eq!(state.submission, 0);
    }

    #[test]
    fn test_in_flight_is_not_settled() {
        let mut state = AppState::default();
        state.in_flight = true;
        assert!(!state.is_settled());

        state.in_flight = false;
        state.pending_animations = 2;
        assert!(!state.is_settled());
    }
}
