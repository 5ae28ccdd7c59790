//! Engine - orchestration state shared by every frontend
//!
//! The Engine owns the application state, the rendering target, the message
//! channel, the analysis client and the settings. Frontends feed it messages
//! and subscribe to the events it broadcasts.

use std::sync::Arc;

use resopt_client::{AnalysisClient, AnalysisTransport, HttpTransport};
use resopt_core::prelude::*;
use resopt_core::ViewSection;
use resopt_render::ViewSink;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    section: ViewSection,
    active_stage: Option<usize>,
    submission: u64,
    in_flight: bool,
    pending_animations: usize,
    alert_count: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            section: state.section.current(),
            active_stage: state.progress.active(),
            submission: state.submission,
            in_flight: state.in_flight,
            pending_animations: state.pending_animations,
            alert_count: state.alerts.len(),
        }
    }
}

/// Orchestration engine for the Resume Optimizer client.
///
/// Generic over the rendering target `S` and the transport `T` so tests can
/// run the whole flow against an in-memory page and a canned backend.
pub struct Engine<S, T> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Rendering target every update writes to
    sink: S,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    client: Arc<AnalysisClient<T>>,

    /// Loaded settings
    pub settings: Settings,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,

    /// OS signal listener, aborted on shutdown
    signal_task: JoinHandle<()>,
}

impl<S: ViewSink> Engine<S, HttpTransport> {
    /// Engine talking to the backend named by `settings.server.base_url`.
    pub fn http(settings: Settings, sink: S) -> Result<Self> {
        let transport = HttpTransport::new(&settings.base_url()?)?;
        Self::new(settings, sink, transport)
    }
}

impl<S, T> Engine<S, T>
where
    S: ViewSink,
    T: AnalysisTransport + Sync + 'static,
{
    /// Create a new Engine.
    ///
    /// Fails only when the configured base URL is unusable. Must be called
    /// from within a tokio runtime: the signal handler is spawned here.
    pub fn new(settings: Settings, sink: S, transport: T) -> Result<Self> {
        let state = AppState::new(settings.stages(), settings.render_options()?);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let signal_task = signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(256);

        Ok(Self {
            state,
            sink,
            msg_tx,
            msg_rx,
            client: Arc::new(AnalysisClient::new(transport)),
            settings,
            event_tx,
            signal_task,
        })
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped and the receiver reports `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle, then emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            &mut self.sink,
            msg,
            &self.msg_tx,
            &self.client,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task or input source.
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    /// Process incoming messages until no request is outstanding and every
    /// dial has settled, or a quit was requested.
    pub async fn run_until_settled(&mut self) {
        while !self.state.is_settled() && !self.should_quit() {
            match self.msg_rx.recv().await {
                Some(msg) => self.process_message(msg),
                None => break,
            }
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn client(&self) -> &AnalysisClient<T> {
        &self.client
    }

    /// Stop the progress timeline and the signal listener, then notify
    /// subscribers.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        self.state.progress.stop();
        self.signal_task.abort();
        info!("Engine shut down after {} submission(s)", self.state.submission);
    }

    /// Compare pre/post snapshots and emit an event per detected change.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre == post {
            return;
        }

        if post.alert_count > pre.alert_count {
            for message in &self.state.alerts[pre.alert_count..] {
                self.emit(EngineEvent::AlertRaised {
                    message: message.clone(),
                });
            }
        }

        if pre.section != post.section {
            self.emit(EngineEvent::SectionChanged {
                from: pre.section,
                to: post.section,
            });
        }

        if pre.active_stage != post.active_stage {
            if let Some(index) = post.active_stage {
                let label = self.state.progress.stages()[index].label.to_string();
                self.emit(EngineEvent::StageActivated { index, label });
            }
        }

        if pre.in_flight && !post.in_flight {
            match &self.state.last_failure {
                Some(failure) => self.emit(EngineEvent::AnalysisFailed {
                    submission: post.submission,
                    message: failure.message.clone(),
                }),
                None => self.emit(EngineEvent::AnalysisSucceeded {
                    submission: post.submission,
                }),
            }
        }

        if pre.submission == post.submission
            && pre.pending_animations > 0
            && post.pending_animations == 0
        {
            self.emit(EngineEvent::AnimationsSettled {
                submission: post.submission,
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{docx, FakeTransport, FULL_RESPONSE};
    use resopt_core::{ScoreKind, StageStatus};
    use resopt_render::{Control, Page, Slot};

    fn engine(transport: FakeTransport) -> Engine<Page, FakeTransport> {
        Engine::new(Settings::default(), Page::new(), transport).unwrap()
    }

    fn fill(engine: &mut Engine<Page, FakeTransport>) {
        engine.process_message(Message::SelectFile(docx("resume.docx")));
        engine.process_message(Message::SetJobTitle("Backend Engineer".into()));
        engine.process_message(Message::SetJobDescription("Build services".into()));
    }

    fn collect(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_engine_new_starts_on_upload() {
        let engine = engine(FakeTransport::ok(FULL_RESPONSE));

        assert!(!engine.should_quit());
        assert!(engine.is_settled());
        assert_eq!(engine.sink().current_section(), Some(ViewSection::Upload));
    }

    #[tokio::test]
    async fn test_engine_rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.server.base_url = "ftp://example.com".into();

        let result = Engine::new(settings, Page::new(), FakeTransport::ok("{}"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_engine_drain_empty_channel() {
        let mut engine = engine(FakeTransport::ok(FULL_RESPONSE));
        assert_eq!(engine.drain_pending_messages(), 0);
    }

    #[tokio::test]
    async fn test_engine_process_quit_message() {
        let mut engine = engine(FakeTransport::ok(FULL_RESPONSE));
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_subscribe_receives_shutdown_event() {
        let mut engine = engine(FakeTransport::ok(FULL_RESPONSE));
        let mut rx = engine.subscribe();

        engine.shutdown().await;

        assert_eq!(rx.try_recv().ok(), Some(EngineEvent::Shutdown));
    }

    #[tokio::test]
    async fn test_shutdown_stops_signal_listener() {
        let mut engine = engine(FakeTransport::ok(FULL_RESPONSE));

        engine.shutdown().await;

        let joined = (&mut engine.signal_task).await;
        assert!(joined.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_alert_event() {
        let mut engine = engine(FakeTransport::ok(FULL_RESPONSE));
        let mut rx = engine.subscribe();

        engine.process_message(Message::SubmitRequested);

        assert_eq!(
            collect(&mut rx),
            vec![EngineEvent::AlertRaised {
                message: "Please upload your resume (.docx) first".into()
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_submission_flow() {
        let transport = FakeTransport::ok(FULL_RESPONSE).with_delay(Duration::from_secs(5));
        let mut engine = engine(transport.clone());
        fill(&mut engine);
        let mut rx = engine.subscribe();

        engine.process_message(Message::SubmitRequested);
        assert!(!engine.sink().control_enabled(Control::Submit));

        engine.run_until_settled().await;

        let page = engine.sink();
        assert_eq!(page.current_section(), Some(ViewSection::Results));
        assert!(page.control_enabled(Control::Submit));
        assert_eq!(page.dial(ScoreKind::Ats).unwrap().value, "92");
        assert_eq!(page.dial(ScoreKind::Skills).unwrap().value, "85");
        assert_eq!(page.stage(0).map(|(_, s)| s), Some(StageStatus::Done));
        assert_eq!(transport.sent().len(), 1);

        assert_eq!(
            collect(&mut rx),
            vec![
                EngineEvent::SectionChanged {
                    from: ViewSection::Upload,
                    to: ViewSection::Loading
                },
                EngineEvent::StageActivated {
                    index: 0,
                    label: "Reading your resume".into()
                },
                EngineEvent::StageActivated {
                    index: 1,
                    label: "Researching the company and role".into()
                },
                EngineEvent::SectionChanged {
                    from: ViewSection::Loading,
                    to: ViewSection::Results
                },
                EngineEvent::AnalysisSucceeded { submission: 1 },
                EngineEvent::AnimationsSettled { submission: 1 },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dials_animate_concurrently() {
        let transport = FakeTransport::ok(FULL_RESPONSE).with_delay(Duration::from_secs(5));
        let mut engine = engine(transport);
        fill(&mut engine);

        engine.process_message(Message::SubmitRequested);

        let mut finished_at = None;
        let mut settled = 0;
        while !engine.is_settled() {
            let msg = engine.next_message().await.unwrap();
            let finished = matches!(msg, Message::AnalysisFinished { .. });
            if matches!(msg, Message::DialSettled { .. }) {
                settled += 1;
            }
            engine.process_message(msg);
            if finished {
                finished_at = Some(tokio::time::Instant::now());
            }
        }

        let elapsed = finished_at.unwrap().elapsed();
        let timing = Settings::default().animation;
        let longest = Duration::from_millis(
            timing.stroke_delay_ms.max(timing.counter_duration_ms),
        );

        assert_eq!(settled, ScoreKind::ALL.len());
        assert!(elapsed >= longest, "settled after {elapsed:?}");
        assert!(
            elapsed < longest + Duration::from_millis(100),
            "dials ran one after another: settled after {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_flow() {
        let transport = FakeTransport::replying(500, r#"{"error": "Model overloaded"}"#)
            .with_delay(Duration::from_secs(1));
        let mut engine = engine(transport);
        fill(&mut engine);
        let mut rx = engine.subscribe();

        engine.process_message(Message::SubmitRequested);
        engine.run_until_settled().await;

        assert_eq!(engine.sink().current_section(), Some(ViewSection::Error));
        assert_eq!(
            engine.sink().text(Slot::ErrorMessage),
            Some("Model overloaded")
        );

        let events = collect(&mut rx);
        assert!(events.contains(&EngineEvent::AnalysisFailed {
            submission: 1,
            message: "Model overloaded".into()
        }));
        assert!(!engine.state.progress.has_pending_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_stage_advance_after_completion() {
        let transport = FakeTransport::ok(FULL_RESPONSE).with_delay(Duration::from_secs(1));
        let mut engine = engine(transport);
        fill(&mut engine);

        engine.process_message(Message::SubmitRequested);
        engine.run_until_settled().await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        engine.drain_pending_messages();

        assert_eq!(
            engine.sink().stage(1).map(|(_, s)| s),
            Some(StageStatus::Pending)
        );
        assert_eq!(engine.sink().current_section(), Some(ViewSection::Results));
    }
}
