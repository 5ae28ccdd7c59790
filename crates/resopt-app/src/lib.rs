//! resopt-app - Application state and orchestration for the Resume Optimizer client
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! submission flow: section switching, file selection, the simulated progress
//! timeline, result rendering and score animation. The [`Engine`] ties it to
//! a message channel, an analysis client and configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod file_selection;
pub mod handler;
pub mod message;
pub mod process;
pub mod progress;
pub mod section;
pub mod signals;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use file_selection::FileSelectionManager;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use progress::{ProgressSimulator, StageTimer};
pub use section::SectionController;
pub use signals::ShutdownSignal;
pub use state::AppState;
