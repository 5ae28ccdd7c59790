//! Shared test doubles

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockall::mock;
use resopt_client::{AnalysisForm, AnalysisTransport, TransportResponse};
use resopt_core::prelude::*;
use resopt_core::{RequestFields, ScoreKind, SelectedDocument, StageStatus, ViewSection};
use resopt_render::{Control, DialUpdate, Panel, ScrollBehavior, Slot, ViewSink};

mock! {
    pub Sink {}

    impl ViewSink for Sink {
        fn set_section_visible(&mut self, section: ViewSection, visible: bool);
        fn replay_entrance(&mut self, section: ViewSection);
        fn scroll_to_top(&mut self, behavior: ScrollBehavior);
        fn set_text(&mut self, slot: Slot, text: &str);
        fn set_html(&mut self, slot: Slot, html: &str);
        fn set_panel_visible(&mut self, panel: Panel, visible: bool);
        fn set_control_enabled(&mut self, control: Control, enabled: bool);
        fn reset_control(&mut self, control: Control);
        fn set_stage(&mut self, index: usize, label: &str, status: StageStatus);
        fn update_dial(&mut self, kind: ScoreKind, update: DialUpdate);
        fn alert(&mut self, message: &str);
    }
}

/// Replies with a canned response after an optional delay and records every
/// form it was handed.
#[derive(Clone)]
pub struct FakeTransport {
    reply: std::result::Result<TransportResponse, String>,
    delay: Duration,
    sent: Arc<Mutex<Vec<AnalysisForm>>>,
}

impl FakeTransport {
    pub fn ok(body: &str) -> Self {
        Self::replying(200, body)
    }

    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(TransportResponse::new(status, body)),
            delay: Duration::ZERO,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unreachable(cause: &str) -> Self {
        Self {
            reply: Err(cause.to_string()),
            delay: Duration::ZERO,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sent(&self) -> Vec<AnalysisForm> {
        self.sent.lock().unwrap().clone()
    }
}

impl AnalysisTransport for FakeTransport {
    async fn send(&self, form: AnalysisForm) -> Result<TransportResponse> {
        self.sent.lock().unwrap().push(form);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(Error::transport)
    }
}

pub fn docx(name: &str) -> SelectedDocument {
    SelectedDocument::from_bytes(name, b"PK\x03\x04".to_vec())
}

pub fn filled_form() -> RequestFields {
    RequestFields {
        job_title: "Backend Engineer".to_string(),
        job_description: "Build services".to_string(),
        ..Default::default()
    }
}

pub const FULL_RESPONSE: &str = r###"{
    "success": true,
    "scores": {"skills": 85, "experience": 90, "impact": 75, "technical_match": 88, "cultural_match": 80},
    "ats_score": 92,
    "ats_warnings": ["Avoid tables"],
    "gap_analysis": "## Gaps\n- Kubernetes",
    "suggestions": [{"section": "Experience", "original_text": "Built APIs",
                     "replacement_text": "Built REST APIs serving 1M users", "reason": "Quantify"}],
    "interview_questions": ["Tell me about a migration you led."],
    "cover_letter": "Dear Hiring Manager,",
    "downloads": {"cover_letter": "/download/cover.pdf"},
    "research_summary": {"company": "TechCorp", "cultural_tone": "corporate"}
}"###;
