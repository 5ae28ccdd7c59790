//! File logging for the client binaries
//!
//! Logs never go to stdout: in headless mode stdout carries NDJSON events.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "resopt.log";

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "RESOPT_LOG";

/// Workspace crates that log at the default level; everything else logs
/// warnings only.
const CLIENT_CRATES: [&str; 5] = [
    "resopt",
    "resopt_core",
    "resopt_app",
    "resopt_client",
    "resopt_render",
];

/// Start writing logs to a daily rolling file in `log_dir`, or in
/// [`default_log_dir`] when `None`.
///
/// The returned guard flushes buffered lines on drop; keep it alive for the
/// life of the process.
///
/// # Examples
/// ```bash
/// RESOPT_LOG=debug resopt --interactive
/// RESOPT_LOG=resopt_app=trace resopt --resume cv.docx ...
/// ```
pub fn init(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!(
        "Resume Optimizer client {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.join(LOG_FILE_NAME).display()
    );

    Ok(guard)
}

/// `<data dir>/resume-optimizer/logs`, falling back to `./logs`
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("resume-optimizer"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}

fn default_directives(level: &str) -> String {
    let mut directives: Vec<String> = CLIENT_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}
