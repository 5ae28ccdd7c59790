//! # resopt-core - Core Domain Types
//!
//! Foundation crate for the Resume Optimizer client. Provides domain types,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ViewSection`] - The four mutually exclusive top-level views
//! - [`ProgressStage`], [`StageStatus`] - Simulated progress timeline
//! - [`ScoreKind`] - The six scores shown on the results page
//!
//! ### Request (`request`)
//! - [`SelectedDocument`] - The single uploaded résumé
//! - [`AnalysisRequest`] - Validated submission payload
//! - [`ValidationError`] - Why a submission was refused before the network
//!
//! ### Result (`result`)
//! - [`AnalysisResult`] - Leniently parsed analysis payload, every field optional
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum; [`Error::is_fatal`] marks startup failures
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use resopt_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod request;
pub mod result;
pub mod types;

/// Prelude for common imports used throughout all Resume Optimizer crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use request::{
    AnalysisRequest, DocumentData, RequestFields, SelectedDocument, ValidationError,
    ACCEPTED_EXTENSION,
};
pub use result::{
    AnalysisResult, ArtifactKind, DownloadSet, EditResults, ResearchSummary, ScoreSet, Suggestion,
};
pub use types::{ProgressStage, ScoreKind, StageStatus, ViewSection, DEFAULT_STAGES, STAGE_COUNT};
