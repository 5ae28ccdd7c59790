//! Headless mode - JSON event output
//!
//! Drives the engine without a browser page: every engine event is written
//! to stdout as one NDJSON line and the rendered page is saved as HTML.
//!
//! # Event Format
//!
//! Each event has an "event" field indicating its type, along with
//! event-specific data and a millisecond timestamp.
//!
//! ```json
//! {"event":"section_changed","from":"upload","to":"loading","timestamp":1704700001000}
//! {"event":"stage_activated","index":0,"label":"Reading your resume","timestamp":1704700001000}
//! {"event":"analysis_succeeded","submission":1,"timestamp":1704700040000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use resopt_app::EngineEvent;
use resopt_core::{AnalysisResult, ViewSection};
use serde::Serialize;
use tracing::error;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    SectionChanged {
        from: ViewSection,
        to: ViewSection,
        timestamp: i64,
    },

    StageActivated {
        index: usize,
        label: String,
        timestamp: i64,
    },

    /// An alert the page would have shown
    Alert { message: String, timestamp: i64 },

    AnalysisSucceeded { submission: u64, timestamp: i64 },

    AnalysisFailed {
        submission: u64,
        message: String,
        timestamp: i64,
    },

    AnimationsSettled { submission: u64, timestamp: i64 },

    /// Full analysis payload, only with `--json`
    Result {
        result: AnalysisResult,
        timestamp: i64,
    },

    /// Rendered page written to disk
    PageSaved { path: String, timestamp: i64 },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one event per line
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn result(result: AnalysisResult) -> Self {
        Self::Result {
            result,
            timestamp: Self::now(),
        }
    }

    pub fn page_saved(path: &std::path::Path) -> Self {
        Self::PageSaved {
            path: path.display().to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<EngineEvent> for HeadlessEvent {
    fn from(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::SectionChanged { from, to } => Self::SectionChanged {
                from,
                to,
                timestamp,
            },
            EngineEvent::StageActivated { index, label } => Self::StageActivated {
                index,
                label,
                timestamp,
            },
            EngineEvent::AlertRaised { message } => Self::Alert { message, timestamp },
            EngineEvent::AnalysisSucceeded { submission } => Self::AnalysisSucceeded {
                submission,
                timestamp,
            },
            EngineEvent::AnalysisFailed {
                submission,
                message,
            } => Self::AnalysisFailed {
                submission,
                message,
                timestamp,
            },
            EngineEvent::AnimationsSettled { submission } => Self::AnimationsSettled {
                submission,
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
