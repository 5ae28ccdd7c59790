//! Core domain types shared by the state machine and the renderer

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// One of the four mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSection {
    /// Document picker and job-context form
    #[default]
    Upload,
    /// Simulated progress timeline while the request is in flight
    Loading,
    /// Rendered analysis panels
    Results,
    /// Failure message with retry
    Error,
}

impl ViewSection {
    pub const ALL: [ViewSection; 4] = [
        ViewSection::Upload,
        ViewSection::Loading,
        ViewSection::Results,
        ViewSection::Error,
    ];

    /// DOM-style identifier used by the page model
    pub fn id(&self) -> &'static str {
        match self {
            ViewSection::Upload => "upload-section",
            ViewSection::Loading => "loading-section",
            ViewSection::Results => "results-section",
            ViewSection::Error => "error-section",
        }
    }
}

impl fmt::Display for ViewSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewSection::Upload => "upload",
            ViewSection::Loading => "loading",
            ViewSection::Results => "results",
            ViewSection::Error => "error",
        };
        f.write_str(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress stages
// ─────────────────────────────────────────────────────────────────────────────

/// Number of stages in the simulated timeline.
pub const STAGE_COUNT: usize = 5;

/// One step of the simulated progress sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStage {
    pub label: &'static str,
    pub duration: Duration,
}

impl ProgressStage {
    pub const fn new(label: &'static str, duration_ms: u64) -> Self {
        Self {
            label,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// Default timeline, approximating the backend pipeline (parse, research,
/// score, suggest, generate). The last duration is nominal only: the final
/// stage holds until the response arrives.
pub const DEFAULT_STAGES: [ProgressStage; STAGE_COUNT] = [
    ProgressStage::new("Reading your resume", 3_000),
    ProgressStage::new("Researching the company and role", 15_000),
    ProgressStage::new("Analyzing gaps and scoring your fit", 20_000),
    ProgressStage::new("Writing tailored suggestions", 20_000),
    ProgressStage::new("Generating your documents", 15_000),
];

/// Visual status of a single stage in the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Pending,
    Active,
    Done,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scores
// ─────────────────────────────────────────────────────────────────────────────

/// The six scores rendered as dials on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Ats,
    Skills,
    Experience,
    Impact,
    TechnicalMatch,
    CulturalMatch,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 6] = [
        ScoreKind::Ats,
        ScoreKind::Skills,
        ScoreKind::Experience,
        ScoreKind::Impact,
        ScoreKind::TechnicalMatch,
        ScoreKind::CulturalMatch,
    ];

    /// Key used by the backend payload
    pub fn key(&self) -> &'static str {
        match self {
            ScoreKind::Ats => "ats",
            ScoreKind::Skills => "skills",
            ScoreKind::Experience => "experience",
            ScoreKind::Impact => "impact",
            ScoreKind::TechnicalMatch => "technical_match",
            ScoreKind::CulturalMatch => "cultural_match",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreKind::Ats => "ATS Score",
            ScoreKind::Skills => "Skills",
            ScoreKind::Experience => "Experience",
            ScoreKind::Impact => "Impact",
            ScoreKind::TechnicalMatch => "Technical Match",
            ScoreKind::CulturalMatch => "Cultural Match",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_section_is_upload() {
        assert_eq!(ViewSection::default(), ViewSection::Upload);
    }

    #[test]
    fn test_section_ids_are_unique() {
        let mut ids: Vec<_> = ViewSection::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_default_stages_shape() {
        assert_eq!(DEFAULT_STAGES.len(), STAGE_COUNT);
        assert!(DEFAULT_STAGES.iter().all(|s| !s.label.is_empty()));
        assert_eq!(DEFAULT_STAGES[0].duration, Duration::from_secs(3));
    }

    #[test]
    fn test_score_keys_match_payload_names() {
        let keys: Vec<_> = ScoreKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(
            keys,
            vec![
                "ats",
                "skills",
                "experience",
                "impact",
                "technical_match",
                "cultural_match"
            ]
        );
    }
}
