//! Headless mode runner - drives the engine from CLI arguments or stdin
//!
//! One-shot mode fills the form from arguments, submits once and waits until
//! the result (or failure) has settled. Interactive mode reads named commands
//! from stdin until `quit` or end of input.

use std::path::{Path, PathBuf};

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use resopt_app::{Engine, EngineEvent, Message, Settings};
use resopt_client::HttpTransport;
use resopt_core::prelude::*;
use resopt_core::SelectedDocument;
use resopt_render::Page;

use super::HeadlessEvent;

type HeadlessEngine = Engine<Page, HttpTransport>;

/// Form contents for a one-shot run
#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: PathBuf,
    pub job_title: String,
    pub job_description: String,
    pub company_name: Option<String>,
    pub auto_apply: bool,
}

/// Whether the run ended on a successful analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
}

/// A parsed stdin line
#[derive(Debug)]
enum Command {
    Dispatch(Message),
    Save(PathBuf),
}

/// Whichever source produced input first
enum Input {
    Engine(Option<Message>),
    Stdin(Option<Command>),
}

/// Engine plus the subscription its events are forwarded from
struct Headless {
    engine: HeadlessEngine,
    events: broadcast::Receiver<EngineEvent>,
}

impl Headless {
    /// Start the engine, reporting a startup failure as an `error` event
    /// before returning it.
    fn new(settings: Settings) -> Result<Self> {
        let engine = Engine::http(settings, Page::new()).inspect_err(|e| {
            error!("Engine failed to start: {}", e);
            HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
        })?;
        let events = engine.subscribe();
        info!("Analysis endpoint: {}", engine.client().transport().analyze_url());
        Ok(Self { engine, events })
    }

    /// Process one message and forward whatever it emitted.
    fn step(&mut self, msg: Message) {
        self.engine.process_message(msg);
        self.flush_events();
    }

    fn flush_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => HeadlessEvent::from(event).emit(),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("Dropped {} engine events", n);
                }
                Err(_) => break,
            }
        }
    }

    /// Process background messages until nothing is outstanding.
    async fn settle(&mut self) {
        while !self.engine.is_settled() && !self.engine.should_quit() {
            match self.engine.next_message().await {
                Some(msg) => self.step(msg),
                None => break,
            }
        }
    }

    fn save_page(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.engine.sink().to_html())?;
        info!("Page written to {}", path.display());
        HeadlessEvent::page_saved(path).emit();
        Ok(())
    }

    fn status(&self) -> RunStatus {
        let state = &self.engine.state;
        if state.last_result.is_some() && state.last_failure.is_none() {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        }
    }

    async fn shutdown(&mut self) {
        self.engine.shutdown().await;
        self.flush_events();
    }
}

/// Run a single submission and write the rendered page to `output`.
pub async fn run_once(
    settings: Settings,
    submission: Submission,
    output: &Path,
    print_json: bool,
) -> Result<RunStatus> {
    info!("═══════════════════════════════════════════════════════");
    info!("Resume Optimizer starting in ONE-SHOT mode");
    info!("Resume: {}", submission.resume.display());
    info!("═══════════════════════════════════════════════════════");

    let mut headless = Headless::new(settings)?;

    headless.step(Message::SelectFile(SelectedDocument::from_path(
        &submission.resume,
    )));
    headless.step(Message::SetJobTitle(submission.job_title));
    headless.step(Message::SetJobDescription(submission.job_description));
    if let Some(company) = submission.company_name {
        headless.step(Message::SetCompanyName(company));
    }
    headless.step(Message::SetAutoApply(submission.auto_apply));
    headless.step(Message::SubmitRequested);

    headless.settle().await;

    let status = headless.status();
    if status == RunStatus::Succeeded && print_json {
        if let Some(result) = headless.engine.state.last_result.clone() {
            HeadlessEvent::result(result).emit();
        }
    }

    if let Err(e) = headless.save_page(output) {
        error!("Failed to write page: {}", e);
        let message = format!("Failed to write {}: {}", output.display(), e);
        HeadlessEvent::error(message, e.is_fatal()).emit();
    }

    headless.shutdown().await;
    Ok(status)
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run_interactive(settings: Settings) -> Result<RunStatus> {
    info!("═══════════════════════════════════════════════════════");
    info!("Resume Optimizer starting in INTERACTIVE mode");
    info!("═══════════════════════════════════════════════════════");

    let mut headless = Headless::new(settings)?;

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(32);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(cmd_tx);
    });

    loop {
        if headless.engine.should_quit() {
            info!("Quit requested");
            break;
        }

        let input = tokio::select! {
            msg = headless.engine.next_message() => Input::Engine(msg),
            cmd = cmd_rx.recv() => Input::Stdin(cmd),
        };

        match input {
            Input::Engine(Some(msg)) | Input::Stdin(Some(Command::Dispatch(msg))) => {
                headless.step(msg)
            }
            Input::Stdin(Some(Command::Save(path))) => {
                if let Err(e) = headless.save_page(&path) {
                    error!("Failed to write page: {}", e);
                    let message = format!("Failed to write {}: {}", path.display(), e);
                    HeadlessEvent::error(message, e.is_fatal()).emit();
                }
            }
            Input::Stdin(None) => {
                info!("Stdin closed");
                headless.settle().await;
                break;
            }
            Input::Engine(None) => {
                info!("Message channel closed");
                break;
            }
        }
    }

    let status = headless.status();
    headless.shutdown().await;
    Ok(status)
}

/// Map one stdin line to a command. `None` for blank or unknown input.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let message = match (verb, rest) {
        ("", _) => return None,
        ("select", path) if !path.is_empty() => {
            Message::SelectFile(SelectedDocument::from_path(path))
        }
        ("clear", _) => Message::ClearFile,
        ("title", text) => Message::SetJobTitle(text.to_string()),
        ("description", text) => Message::SetJobDescription(text.to_string()),
        ("company", text) => Message::SetCompanyName(text.to_string()),
        ("auto-apply", "on") => Message::SetAutoApply(true),
        ("auto-apply", "off") => Message::SetAutoApply(false),
        ("submit", _) => Message::SubmitRequested,
        ("retry", _) => Message::Retry,
        ("restart", _) => Message::Restart,
        ("save", path) if !path.is_empty() => return Some(Command::Save(PathBuf::from(path))),
        ("q" | "quit", _) => Message::Quit,
        _ => {
            warn!("Unknown stdin command: {}", line);
            return None;
        }
    };

    Some(Command::Dispatch(message))
}

/// Read stdin lines and forward parsed commands (blocking version)
fn spawn_stdin_reader_blocking(cmd_tx: mpsc::Sender<Command>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let Some(command) = parse_command(&line) else {
                    continue;
                };
                let quitting = matches!(command, Command::Dispatch(Message::Quit));
                if cmd_tx.blocking_send(command).is_err() || quitting {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
