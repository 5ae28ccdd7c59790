//! In-memory page model
//!
//! [`Page`] records every sink call so state can be inspected by tests and the
//! headless runner, and serializes to a standalone HTML document.

use std::collections::HashMap;
use std::fmt::Write as _;

use resopt_core::{ScoreKind, StageStatus, ViewSection, DEFAULT_STAGES};

use crate::escape::escape_html;
use crate::palette;
use crate::score::{format_score, Tier, DIAL_CIRCUMFERENCE, DIAL_RADIUS};
use crate::sink::{Control, DialUpdate, Panel, ScrollBehavior, Slot, ViewSink};

/// Slot content, tagged by how it was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Text(String),
    Html(String),
}

impl SlotContent {
    fn to_markup(&self) -> String {
        match self {
            SlotContent::Text(text) => escape_html(text),
            SlotContent::Html(html) => html.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialState {
    pub tier: Option<Tier>,
    pub dash_offset: f64,
    pub value: String,
}

impl Default for DialState {
    fn default() -> Self {
        Self {
            tier: None,
            dash_offset: DIAL_CIRCUMFERENCE,
            value: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub resets: u32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            enabled: true,
            resets: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    sections: HashMap<ViewSection, bool>,
    entrance_replays: HashMap<ViewSection, u32>,
    scrolls: Vec<ScrollBehavior>,
    slots: HashMap<Slot, SlotContent>,
    panels: HashMap<Panel, bool>,
    controls: HashMap<Control, ControlState>,
    stages: Vec<(String, StageStatus)>,
    dials: HashMap<ScoreKind, DialState>,
    alerts: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Freshly loaded page: upload view with an empty dropzone.
    pub fn new() -> Self {
        let sections = ViewSection::ALL
            .iter()
            .map(|s| (*s, *s == ViewSection::Upload))
            .collect();

        let mut panels = HashMap::new();
        panels.insert(Panel::Dropzone, true);

        Self {
            sections,
            entrance_replays: HashMap::new(),
            scrolls: Vec::new(),
            slots: HashMap::new(),
            panels,
            controls: HashMap::new(),
            stages: DEFAULT_STAGES
                .iter()
                .map(|s| (s.label.to_string(), StageStatus::Pending))
                .collect(),
            dials: HashMap::new(),
            alerts: Vec::new(),
        }
    }

    pub fn is_visible(&self, section: ViewSection) -> bool {
        self.sections.get(&section).copied().unwrap_or(false)
    }

    pub fn visible_sections(&self) -> Vec<ViewSection> {
        ViewSection::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }

    /// The visible section, if exactly one is visible.
    pub fn current_section(&self) -> Option<ViewSection> {
        match self.visible_sections().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn entrance_replays(&self, section: ViewSection) -> u32 {
        self.entrance_replays.get(&section).copied().unwrap_or(0)
    }

    pub fn scrolls(&self) -> &[ScrollBehavior] {
        &self.scrolls
    }

    pub fn content(&self, slot: Slot) -> Option<&SlotContent> {
        self.slots.get(&slot)
    }

    /// Plain text inserted into a slot.
    pub fn text(&self, slot: Slot) -> Option<&str> {
        match self.slots.get(&slot) {
            Some(SlotContent::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Markup inserted into a slot.
    pub fn html(&self, slot: Slot) -> Option<&str> {
        match self.slots.get(&slot) {
            Some(SlotContent::Html(html)) => Some(html),
            _ => None,
        }
    }

    pub fn panel_visible(&self, panel: Panel) -> bool {
        self.panels.get(&panel).copied().unwrap_or(false)
    }

    pub fn control(&self, control: Control) -> ControlState {
        self.controls.get(&control).copied().unwrap_or_default()
    }

    pub fn control_enabled(&self, control: Control) -> bool {
        self.control(control).enabled
    }

    pub fn stage(&self, index: usize) -> Option<(&str, StageStatus)> {
        self.stages
            .get(index)
            .map(|(label, status)| (label.as_str(), *status))
    }

    pub fn stage_statuses(&self) -> Vec<StageStatus> {
        self.stages.iter().map(|(_, status)| *status).collect()
    }

    pub fn dial(&self, kind: ScoreKind) -> Option<&DialState> {
        self.dials.get(&kind)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialization
    // ─────────────────────────────────────────────────────────────────────────

    fn slot(&self, slot: Slot) -> String {
        self.slots
            .get(&slot)
            .map(SlotContent::to_markup)
            .unwrap_or_default()
    }

    fn hidden_section(&self, section: ViewSection) -> &'static str {
        if self.is_visible(section) {
            ""
        } else {
            " hidden"
        }
    }

    fn hidden_panel(&self, panel: Panel) -> &'static str {
        if self.panel_visible(panel) {
            ""
        } else {
            " hidden"
        }
    }

    fn write_upload(&self, out: &mut String) {
        let _ = writeln!(
            out,
            r#"<section id="{}"{}>"#,
            ViewSection::Upload.id(),
            self.hidden_section(ViewSection::Upload)
        );
        let _ = writeln!(
            out,
            r#"<div class="dropzone"{}>Drop your resume (.docx) here</div>"#,
            self.hidden_panel(Panel::Dropzone)
        );
        let _ = writeln!(
            out,
            r#"<div class="file-chip"{}>{}</div>"#,
            self.hidden_panel(Panel::FileChip),
            self.slot(Slot::SelectedFileName)
        );
        let disabled = if self.control_enabled(Control::Submit) {
            ""
        } else {
            " disabled"
        };
        let _ = writeln!(out, r#"<button type="submit"{disabled}>Analyze</button>"#);
        out.push_str("</section>\n");
    }

    fn write_loading(&self, out: &mut String) {
        let _ = writeln!(
            out,
            r#"<section id="{}"{}>"#,
            ViewSection::Loading.id(),
            self.hidden_section(ViewSection::Loading)
        );
        let _ = writeln!(out, "<h2>{}</h2>", self.slot(Slot::LoadingTitle));
        out.push_str("<ol class=\"stages\">\n");
        for (label, status) in &self.stages {
            let class = match status {
                StageStatus::Pending => "pending",
                StageStatus::Active => "active",
                StageStatus::Done => "done",
            };
            let _ = writeln!(out, r#"<li class="{class}">{}</li>"#, escape_html(label));
        }
        out.push_str("</ol>\n</section>\n");
    }

    fn write_dial(&self, out: &mut String, kind: ScoreKind) {
        let dial = self.dials.get(&kind).cloned().unwrap_or_default();
        let (class, color) = dial
            .tier
            .map(|t| (t.name(), t.color()))
            .unwrap_or(("", palette::TEXT_MUTED));
        let _ = writeln!(
            out,
            concat!(
                r#"<div class="dial {class}" data-score="{key}">"#,
                r#"<svg viewBox="0 0 100 100">"#,
                r#"<circle cx="50" cy="50" r="{r}" stroke="{track}" fill="none" stroke-width="8"/>"#,
                r#"<circle cx="50" cy="50" r="{r}" stroke="{color}" fill="none" stroke-width="8" "#,
                r#"stroke-dasharray="{c:.2}" stroke-dashoffset="{offset:.2}"/></svg>"#,
                r#"<span class="value" style="color: {color}">{value}</span>"#,
                r#"<span class="label">{label}</span></div>"#
            ),
            class = class,
            key = kind.key(),
            r = format_score(DIAL_RADIUS),
            track = palette::DIAL_TRACK,
            color = color,
            c = DIAL_CIRCUMFERENCE,
            offset = dial.dash_offset,
            value = escape_html(&dial.value),
            label = kind.label(),
        );
    }

    fn write_panel(&self, out: &mut String, panel: Panel, class: &str, heading: &str, slot: Slot) {
        let _ = writeln!(
            out,
            r#"<div class="card {class}"{}><h3>{heading}</h3><div>{}</div></div>"#,
            self.hidden_panel(panel),
            self.slot(slot)
        );
    }

    fn write_results(&self, out: &mut String) {
        let _ = writeln!(
            out,
            r#"<section id="{}"{}>"#,
            ViewSection::Results.id(),
            self.hidden_section(ViewSection::Results)
        );
        let _ = writeln!(
            out,
            r#"<p class="summary">{}</p>"#,
            self.slot(Slot::ResultsSummary)
        );
        out.push_str("<div class=\"dials\">\n");
        for kind in ScoreKind::ALL {
            self.write_dial(out, kind);
        }
        out.push_str("</div>\n");

        self.write_panel(
            out,
            Panel::OverallSummary,
            "overall-summary",
            "Overall Summary",
            Slot::OverallSummary,
        );
        let _ = writeln!(
            out,
            r#"<p class="auto-apply"{}>{}</p>"#,
            self.hidden_panel(Panel::AutoApplyNote),
            self.slot(Slot::AutoApplyNote)
        );
        let _ = writeln!(
            out,
            r#"<div class="card ats-warnings"{}><h3>ATS Warnings</h3><ul>{}</ul></div>"#,
            self.hidden_panel(Panel::AtsWarnings),
            self.slot(Slot::AtsWarnings)
        );
        let _ = writeln!(
            out,
            r#"<div class="card gap-analysis"><h3>Gap Analysis</h3>{}</div>"#,
            self.slot(Slot::GapAnalysis)
        );
        let _ = writeln!(
            out,
            r#"<div class="card suggestions"><h3>Suggestions <span class="count">{}</span></h3>{}</div>"#,
            self.slot(Slot::SuggestionCount),
            self.slot(Slot::Suggestions)
        );
        let _ = writeln!(
            out,
            r#"<div class="card interview"{}><h3>Interview Questions</h3><ol>{}</ol></div>"#,
            self.hidden_panel(Panel::InterviewQuestions),
            self.slot(Slot::InterviewQuestions)
        );
        let _ = writeln!(
            out,
            r#"<div class="card cover-letter"{}><h3>Cover Letter</h3><pre>{}</pre></div>"#,
            self.hidden_panel(Panel::CoverLetter),
            self.slot(Slot::CoverLetter)
        );
        let _ = writeln!(
            out,
            r#"<div class="downloads"{}>{}</div>"#,
            self.hidden_panel(Panel::Downloads),
            self.slot(Slot::Downloads)
        );
        out.push_str("</section>\n");
    }

    fn write_error(&self, out: &mut String) {
        let _ = writeln!(
            out,
            r#"<section id="{}"{}>"#,
            ViewSection::Error.id(),
            self.hidden_section(ViewSection::Error)
        );
        let _ = writeln!(
            out,
            r#"<p class="error-message">{}</p>"#,
            self.slot(Slot::ErrorMessage)
        );
        out.push_str("<button type=\"button\">Try Again</button>\n</section>\n");
    }

    /// Standalone HTML document for the current state.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(8 * 1024);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<title>Resume Optimizer</title>\n<style>\n");
        let _ = writeln!(
            out,
            "body {{ background: {}; color: {}; font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; }}",
            palette::PAGE_BG,
            palette::TEXT_PRIMARY
        );
        let _ = writeln!(
            out,
            ".card {{ background: {}; border-radius: 12px; padding: 1rem 1.5rem; margin: 1rem 0; }}",
            palette::CARD_BG
        );
        let _ = writeln!(
            out,
            ".summary, .label {{ color: {}; }} a {{ color: {}; }}",
            palette::TEXT_MUTED,
            palette::ACCENT
        );
        let _ = writeln!(
            out,
            ".before {{ background: {}; }} .after {{ background: {}; }}",
            palette::BEFORE_BG,
            palette::AFTER_BG
        );
        out.push_str(".dials { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }\n");
        out.push_str(".stages .active { font-weight: bold; } .stages .done { text-decoration: line-through; }\n");
        out.push_str("</style>\n</head>\n<body>\n");

        self.write_upload(&mut out);
        self.write_loading(&mut out);
        self.write_results(&mut out);
        self.write_error(&mut out);

        out.push_str("</body>\n</html>\n");
        out
    }
}

impl ViewSink for Page {
    fn set_section_visible(&mut self, section: ViewSection, visible: bool) {
        self.sections.insert(section, visible);
    }

    fn replay_entrance(&mut self, section: ViewSection) {
        *self.entrance_replays.entry(section).or_default() += 1;
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scrolls.push(behavior);
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.slots.insert(slot, SlotContent::Text(text.to_string()));
    }

    fn set_html(&mut self, slot: Slot, html: &str) {
        self.slots.insert(slot, SlotContent::Html(html.to_string()));
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.panels.insert(panel, visible);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        self.controls.entry(control).or_default().enabled = enabled;
    }

    fn reset_control(&mut self, control: Control) {
        self.controls.entry(control).or_default().resets += 1;
    }

    fn set_stage(&mut self, index: usize, label: &str, status: StageStatus) {
        if index >= self.stages.len() {
            self.stages
                .resize(index + 1, (String::new(), StageStatus::Pending));
        }
        self.stages[index] = (label.to_string(), status);
    }

    fn update_dial(&mut self, kind: ScoreKind, update: DialUpdate) {
        let dial = self.dials.entry(kind).or_default();
        match update {
            DialUpdate::Tier(tier) => dial.tier = Some(tier),
            DialUpdate::Stroke { dash_offset } => dial.dash_offset = dash_offset,
            DialUpdate::Value(value) => dial.value = value,
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::info!("Alert: {}", message);
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_shows_upload_only() {
        let page = Page::new();
        assert_eq!(page.current_section(), Some(ViewSection::Upload));
        assert!(page.panel_visible(Panel::Dropzone));
        assert!(!page.panel_visible(Panel::FileChip));
        assert!(page.control_enabled(Control::Submit));
        assert_eq!(page.stage_statuses(), vec![StageStatus::Pending; 5]);
    }

    #[test]
    fn test_current_section_none_when_ambiguous() {
        let mut page = Page::new();
        page.set_section_visible(ViewSection::Error, true);
        assert_eq!(page.current_section(), None);
    }

    #[test]
    fn test_text_and_html_slots() {
        let mut page = Page::new();
        page.set_text(Slot::CoverLetter, "<b>Dear</b>");
        page.set_html(Slot::GapAnalysis, "<p>ok</p>");

        assert_eq!(page.text(Slot::CoverLetter), Some("<b>Dear</b>"));
        assert_eq!(page.html(Slot::CoverLetter), None);
        assert_eq!(page.html(Slot::GapAnalysis), Some("<p>ok</p>"));
    }

    #[test]
    fn test_to_html_escapes_text_slots() {
        let mut page = Page::new();
        page.set_text(Slot::CoverLetter, "<script>x</script>");
        page.set_html(Slot::GapAnalysis, "<h2>Gaps</h2>");

        let html = page.to_html();
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<h2>Gaps</h2>"));
    }

    #[test]
    fn test_to_html_marks_hidden_sections() {
        let html = Page::new().to_html();
        assert!(html.contains(r#"<section id="upload-section">"#));
        assert!(html.contains(r#"<section id="results-section" hidden>"#));
        assert!(html.contains(r#"<section id="error-section" hidden>"#));
    }

    #[test]
    fn test_control_resets_counted() {
        let mut page = Page::new();
        page.reset_control(Control::FileInput);
        page.reset_control(Control::FileInput);
        assert_eq!(page.control(Control::FileInput).resets, 2);
        assert!(page.control_enabled(Control::FileInput));
    }

    #[test]
    fn test_dial_updates() {
        let mut page = Page::new();
        page.update_dial(ScoreKind::Ats, DialUpdate::Tier(Tier::Good));
        page.update_dial(ScoreKind::Ats, DialUpdate::Value("61".into()));
        let dial = page.dial(ScoreKind::Ats).unwrap();
        assert_eq!(dial.tier, Some(Tier::Good));
        assert_eq!(dial.value, "61");
        assert_eq!(dial.dash_offset, DIAL_CIRCUMFERENCE);
    }
}
