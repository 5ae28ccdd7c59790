//! Resume Optimizer - command-line client for the resume analysis service
//!
//! This is the binary entry point. All logic lives in the workspace crates.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use resopt_app::config::{self, Settings};

use headless::runner::{self, RunStatus, Submission};

/// Resume Optimizer - tailor a resume to a job posting
#[derive(Parser, Debug)]
#[command(name = "resopt")]
#[command(about = "Submit a resume for analysis and render the results", long_about = None)]
struct Args {
    /// Resume to analyze (.docx)
    #[arg(
        long,
        value_name = "FILE",
        required_unless_present_any = ["interactive", "init_config"]
    )]
    resume: Option<PathBuf>,

    /// Job title
    #[arg(long, required_unless_present_any = ["interactive", "init_config"])]
    title: Option<String>,

    /// Job description text
    #[arg(long, conflicts_with = "description_file")]
    description: Option<String>,

    /// Read the job description from a file
    #[arg(long, value_name = "FILE")]
    description_file: Option<PathBuf>,

    /// Company name
    #[arg(long)]
    company: Option<String>,

    /// Ask the service to apply its suggestions to the resume
    #[arg(long)]
    auto_apply: bool,

    /// Analysis service base URL (overrides config and RESOPT_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Where to write the rendered page
    #[arg(long, value_name = "FILE", default_value = "analysis.html")]
    output: PathBuf,

    /// Also emit the full analysis payload as a `result` event
    #[arg(long)]
    json: bool,

    /// Read commands from stdin instead of running a single submission
    #[arg(long, conflicts_with_all = ["resume", "title", "description", "description_file"])]
    interactive: bool,

    /// Write `.resopt/config.toml` with the default settings to the current
    /// directory and exit
    #[arg(long, conflicts_with_all = ["resume", "title", "interactive"])]
    init_config: bool,

    /// Directory for the rolling log file
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn job_description(&self) -> Result<String> {
        match (&self.description, &self.description_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display())),
            (None, None) => bail!("--description or --description-file is required"),
        }
    }
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn load_settings(endpoint: Option<String>) -> Settings {
    let mut settings = config::load_settings(&working_dir());
    config::apply_env_overrides(&mut settings);
    if let Some(endpoint) = endpoint {
        settings.server.base_url = endpoint;
    }
    settings
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let log_guard = resopt_core::logging::init(args.log_dir.as_deref())?;

    if args.init_config {
        let path = config::init_config_dir(&working_dir())?;
        println!("{}", path.display());
        return Ok(());
    }

    let settings = load_settings(args.endpoint.clone());

    let status = if args.interactive {
        runner::run_interactive(settings).await?
    } else {
        let submission = Submission {
            resume: args.resume.clone().unwrap_or_default(),
            job_title: args.title.clone().unwrap_or_default(),
            job_description: args.job_description()?,
            company_name: args.company.clone(),
            auto_apply: args.auto_apply,
        };
        runner::run_once(settings, submission, &args.output, args.json).await?
    };

    if status == RunStatus::Failed && !args.interactive {
        // exit() skips destructors; flush the log file first
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_args() {
        let args = Args::try_parse_from([
            "resopt",
            "--resume",
            "cv.docx",
            "--title",
            "Backend Engineer",
            "--description",
            "Build services",
            "--auto-apply",
        ])
        .unwrap();

        assert_eq!(args.resume, Some(PathBuf::from("cv.docx")));
        assert!(args.auto_apply);
        assert_eq!(args.output, PathBuf::from("analysis.html"));
        assert_eq!(args.job_description().unwrap(), "Build services");
    }

    #[test]
    fn test_description_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Ship things").unwrap();

        let args = Args::try_parse_from([
            "resopt",
            "--resume",
            "cv.docx",
            "--title",
            "SRE",
            "--description-file",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(args.job_description().unwrap(), "Ship things");
    }

    #[test]
    fn test_missing_description_is_an_error() {
        let args =
            Args::try_parse_from(["resopt", "--resume", "cv.docx", "--title", "SRE"]).unwrap();
        assert!(args.job_description().is_err());
    }

    #[test]
    fn test_resume_required_without_interactive() {
        assert!(Args::try_parse_from(["resopt", "--title", "SRE"]).is_err());
    }

    #[test]
    fn test_init_config_needs_no_form_args() {
        let args = Args::try_parse_from(["resopt", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert!(Args::try_parse_from(["resopt", "--init-config", "--interactive"]).is_err());
    }

    #[test]
    fn test_log_dir_flag() {
        let args = Args::try_parse_from(["resopt", "--interactive", "--log-dir", "/tmp/logs"])
            .unwrap();
        assert_eq!(args.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_interactive_conflicts_with_form_args() {
        assert!(Args::try_parse_from(["resopt", "--interactive"]).is_ok());
        assert!(Args::try_parse_from(["resopt", "--interactive", "--resume", "cv.docx"]).is_err());
    }
}
