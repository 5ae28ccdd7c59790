//! Populates the results view from an [`AnalysisResult`]
//!
//! Rendering is total: every field may be absent and each panel degrades on
//! its own. Free text is escaped on the way in; the gap analysis goes through
//! the markdown formatter, which escapes first.

use std::fmt::Write as _;
use std::time::Duration;

use resopt_core::{AnalysisResult, ArtifactKind, ScoreKind, Suggestion};
use url::Url;

use crate::downloads::{resolve_artifact_url, share_url, DEFAULT_SHARE_BASE};
use crate::escape::escape_html;
use crate::markdown::format_markdown;
use crate::score::{AnimationTiming, ScoreAnimation, ScoreAnimator};
use crate::sink::{Panel, Slot, ViewSink};

const DEFAULT_COMPANY: &str = "your target role";
const DEFAULT_TONE: &str = "balanced";
const DEFAULT_SECTION: &str = "General";
const GAP_PLACEHOLDER: &str = "No gap analysis available.";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base for relative artifact URLs
    pub base_url: Option<Url>,
    /// Entrance delay step between suggestion cards
    pub suggestion_stagger: Duration,
    pub share_base: String,
    pub timing: AnimationTiming,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            suggestion_stagger: Duration::from_millis(100),
            share_base: DEFAULT_SHARE_BASE.to_string(),
            timing: AnimationTiming::default(),
        }
    }
}

/// A rendered download entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLink {
    pub kind: ArtifactKind,
    pub url: Url,
    pub share_url: String,
}

/// What the caller still has to drive after the synchronous render.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    /// One per dial, in [`ScoreKind::ALL`] order
    pub animations: Vec<ScoreAnimation>,
    pub downloads: Vec<ArtifactLink>,
}

#[derive(Debug, Clone, Default)]
pub struct ResultRenderer {
    options: RenderOptions,
}

impl ResultRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render(&self, result: &AnalysisResult, sink: &mut dyn ViewSink) -> RenderOutput {
        let summary = format!(
            "Analysis complete for {} • Cultural tone: {}",
            result.company().unwrap_or(DEFAULT_COMPANY),
            result.cultural_tone().unwrap_or(DEFAULT_TONE)
        );
        sink.set_text(Slot::ResultsSummary, &summary);

        let animator = ScoreAnimator::new(self.options.timing);
        let animations = ScoreKind::ALL
            .into_iter()
            .map(|kind| animator.animate(kind, result.score(kind), sink))
            .collect();

        self.render_overall_summary(result, sink);
        self.render_auto_apply(result, sink);
        self.render_ats_warnings(result, sink);

        let gap = result.gap_analysis().unwrap_or(GAP_PLACEHOLDER);
        sink.set_html(Slot::GapAnalysis, &format_markdown(gap));

        self.render_suggestions(&result.suggestions, sink);
        self.render_interview_questions(result, sink);

        match result.cover_letter() {
            Some(letter) => {
                sink.set_text(Slot::CoverLetter, letter);
                sink.set_panel_visible(Panel::CoverLetter, true);
            }
            None => sink.set_panel_visible(Panel::CoverLetter, false),
        }

        let downloads = self.render_downloads(result, sink);

        tracing::debug!(
            "Rendered {} suggestions and {} downloads",
            result.suggestions.len(),
            downloads.len()
        );

        RenderOutput {
            animations,
            downloads,
        }
    }

    fn render_overall_summary(&self, result: &AnalysisResult, sink: &mut dyn ViewSink) {
        match result.overall_summary() {
            Some(text) => {
                sink.set_text(Slot::OverallSummary, text);
                sink.set_panel_visible(Panel::OverallSummary, true);
            }
            None => sink.set_panel_visible(Panel::OverallSummary, false),
        }
    }

    fn render_auto_apply(&self, result: &AnalysisResult, sink: &mut dyn ViewSink) {
        match (result.auto_applied, &result.edit_results) {
            (Some(true), Some(edits)) => {
                let total = edits.applied + edits.failed;
                sink.set_text(
                    Slot::AutoApplyNote,
                    &format!(
                        "Applied {} of {} suggestions to your resume",
                        edits.applied, total
                    ),
                );
                sink.set_panel_visible(Panel::AutoApplyNote, true);
            }
            _ => sink.set_panel_visible(Panel::AutoApplyNote, false),
        }
    }

    fn render_ats_warnings(&self, result: &AnalysisResult, sink: &mut dyn ViewSink) {
        if result.ats_warnings.is_empty() {
            sink.set_panel_visible(Panel::AtsWarnings, false);
            return;
        }

        sink.set_html(Slot::AtsWarnings, &list_items(&result.ats_warnings));
        sink.set_panel_visible(Panel::AtsWarnings, true);
    }

    fn render_suggestions(&self, suggestions: &[Suggestion], sink: &mut dyn ViewSink) {
        sink.set_text(
            Slot::SuggestionCount,
            &format!("{} suggestions", suggestions.len()),
        );

        let stagger = self.options.suggestion_stagger.as_millis();
        let mut html = String::new();
        for (index, suggestion) in suggestions.iter().enumerate() {
            let _ = write!(
                html,
                concat!(
                    r#"<div class="suggestion-card" style="animation-delay: {delay}ms">"#,
                    r#"<div class="suggestion-section">{section}</div>"#,
                    r#"<div class="before"><span>Before</span><p>{before}</p></div>"#,
                    r#"<div class="after"><span>After</span><p>{after}</p></div>"#,
                    r#"<p class="reason">{reason}</p>"#
                ),
                delay = index as u128 * stagger,
                section = escape_html(suggestion.section().unwrap_or(DEFAULT_SECTION)),
                before = escape_html(suggestion.original_text()),
                after = escape_html(suggestion.replacement_text()),
                reason = escape_html(suggestion.reason()),
            );
            if let Some(point) = suggestion.talking_point() {
                let _ = write!(
                    html,
                    r#"<p class="talking-point">Talking point: {}</p>"#,
                    escape_html(point)
                );
            }
            html.push_str("</div>");
        }
        sink.set_html(Slot::Suggestions, &html);
    }

    fn render_interview_questions(&self, result: &AnalysisResult, sink: &mut dyn ViewSink) {
        if result.interview_questions.is_empty() {
            sink.set_panel_visible(Panel::InterviewQuestions, false);
            return;
        }

        sink.set_html(
            Slot::InterviewQuestions,
            &list_items(&result.interview_questions),
        );
        sink.set_panel_visible(Panel::InterviewQuestions, true);
    }

    fn render_downloads(
        &self,
        result: &AnalysisResult,
        sink: &mut dyn ViewSink,
    ) -> Vec<ArtifactLink> {
        let links: Vec<ArtifactLink> = result
            .downloads
            .present()
            .filter_map(|(kind, raw)| {
                let url = resolve_artifact_url(raw, self.options.base_url.as_ref())?;
                let share_url = share_url(&self.options.share_base, kind, &url);
                Some(ArtifactLink {
                    kind,
                    url,
                    share_url,
                })
            })
            .collect();

        if links.is_empty() {
            sink.set_html(Slot::Downloads, "");
            sink.set_panel_visible(Panel::Downloads, false);
            return links;
        }

        let mut html = String::new();
        for link in &links {
            let _ = write!(
                html,
                concat!(
                    r#"<div class="download">"#,
                    r#"<a class="download-link" href="{url}" target="_blank" rel="noopener">Download {label}</a>"#,
                    r#"<a class="share-link" href="{share}" target="_blank" rel="noopener">Share</a>"#,
                    r#"</div>"#
                ),
                url = escape_html(link.url.as_str()),
                label = link.kind.label(),
                share = escape_html(&link.share_url),
            );
        }
        sink.set_html(Slot::Downloads, &html);
        sink.set_panel_visible(Panel::Downloads, true);
        links
    }
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}
