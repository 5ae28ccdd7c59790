//! Top-level view switching

use resopt_core::ViewSection;
use resopt_render::{ScrollBehavior, ViewSink};

/// Owns which of the four sections is visible. All visibility changes go
/// through [`SectionController::show`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionController {
    current: ViewSection,
}

impl SectionController {
    pub fn current(&self) -> ViewSection {
        self.current
    }

    /// Show `section`, hide the rest, replay its entrance and scroll to top.
    /// Re-showing the current section still replays the entrance.
    pub fn show(&mut self, section: ViewSection, sink: &mut dyn ViewSink) {
        for candidate in ViewSection::ALL {
            sink.set_section_visible(candidate, candidate == section);
        }
        sink.replay_entrance(section);
        sink.scroll_to_top(ScrollBehavior::Smooth);

        if self.current != section {
            tracing::debug!("Section {} -> {}", self.current, section);
        }
        self.current = section;
    }
}
