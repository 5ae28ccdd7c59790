//! The single selected résumé

use resopt_core::{SelectedDocument, ValidationError};
use resopt_render::{Control, Panel, Slot, ViewSink};

/// Holds at most one accepted document.
#[derive(Debug, Clone, Default)]
pub struct FileSelectionManager {
    selected: Option<SelectedDocument>,
}

impl FileSelectionManager {
    pub fn selected(&self) -> Option<&SelectedDocument> {
        self.selected.as_ref()
    }

    /// Replace the selection with `document`.
    ///
    /// Rejects names without the accepted extension and leaves the current
    /// selection untouched; the caller surfaces the error as an alert.
    pub fn select(
        &mut self,
        document: SelectedDocument,
        sink: &mut dyn ViewSink,
    ) -> Result<(), ValidationError> {
        if !document.has_accepted_extension() {
            tracing::debug!("Rejected file {:?}", document.name);
            return Err(ValidationError::WrongExtension);
        }

        sink.set_text(Slot::SelectedFileName, &document.name);
        sink.set_panel_visible(Panel::FileChip, true);
        sink.set_panel_visible(Panel::Dropzone, false);

        tracing::info!("Selected {}", document.name);
        self.selected = Some(document);
        Ok(())
    }

    /// Drop the selection and reset the picker so the same file can be
    /// chosen again.
    pub fn clear(&mut self, sink: &mut dyn ViewSink) {
        self.selected = None;
        sink.reset_control(Control::FileInput);
        sink.set_panel_visible(Panel::Dropzone, true);
        sink.set_panel_visible(Panel::FileChip, false);
    }
}
