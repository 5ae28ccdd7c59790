//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
///
/// Failures the user is shown in the error view are
/// `resopt_client::AnalysisFailure`, not this type.
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Transport Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Failed to read document {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("Invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    // ─────────────────────────────────────────────────────────────
    // Startup Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Signal handling error: {message}")]
    Signal { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn document_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DocumentRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_endpoint(url: impl Into<String>) -> Self {
        Self::InvalidEndpoint { url: url.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn signal(message: impl Into<String>) -> Self {
        Self::Signal {
            message: message.into(),
        }
    }

    /// The engine cannot be started: no submission is possible until the
    /// configuration or environment is fixed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::InvalidEndpoint { .. } | Error::Config { .. } | Error::Signal { .. }
        )
    }
}
