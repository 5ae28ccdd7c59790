//! Analysis payload returned by `POST /analyze`
//!
//! The backend response is untrusted and loosely structured: every field is
//! optional, and a field carrying the wrong JSON type is treated as absent
//! rather than failing the whole payload. Empty strings count as absent.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ScoreKind;

/// Deserialize any JSON value into `T`, falling back to `T::default()` when the
/// shape does not match.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Like [`lenient`], but only a JSON object may populate a struct-typed field.
/// Serde would otherwise fill struct fields positionally from an array.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(from_object(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn from_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Deserialize a JSON array element by element, dropping elements of the wrong
/// shape. Anything other than an array yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// [`lenient_list`] for struct elements: only objects are kept.
fn lenient_object_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(from_object).collect(),
        _ => Vec::new(),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Company research summary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResearchSummary {
    #[serde(deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cultural_tone: Option<String>,
}

/// Section and match scores, each 0-100.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreSet {
    #[serde(deserialize_with = "lenient")]
    pub ats: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub skills: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub experience: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub impact: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub technical_match: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub cultural_match: Option<f64>,
}

/// A single before/after text replacement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Suggestion {
    #[serde(deserialize_with = "lenient")]
    pub section: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub original_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub replacement_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub talking_point: Option<String>,
}

impl Suggestion {
    pub fn section(&self) -> Option<&str> {
        non_empty(&self.section)
    }

    pub fn original_text(&self) -> &str {
        non_empty(&self.original_text).unwrap_or_default()
    }

    pub fn replacement_text(&self) -> &str {
        non_empty(&self.replacement_text).unwrap_or_default()
    }

    pub fn reason(&self) -> &str {
        non_empty(&self.reason).unwrap_or_default()
    }

    pub fn talking_point(&self) -> Option<&str> {
        non_empty(&self.talking_point)
    }
}

/// Counts reported when suggestions were applied to the document server-side.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditResults {
    #[serde(deserialize_with = "lenient")]
    pub applied: u32,
    #[serde(deserialize_with = "lenient")]
    pub failed: u32,
}

/// Named downloadable outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    OptimizedResume,
    InterviewPrep,
    CoverLetter,
    TalkingPoints,
}

impl ArtifactKind {
    /// Display order in the downloads bar
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::OptimizedResume,
        ArtifactKind::InterviewPrep,
        ArtifactKind::CoverLetter,
        ArtifactKind::TalkingPoints,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ArtifactKind::OptimizedResume => "optimized_resume",
            ArtifactKind::InterviewPrep => "interview_prep",
            ArtifactKind::CoverLetter => "cover_letter",
            ArtifactKind::TalkingPoints => "talking_points",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::OptimizedResume => "Optimized Resume",
            ArtifactKind::InterviewPrep => "Interview Prep",
            ArtifactKind::CoverLetter => "Cover Letter",
            ArtifactKind::TalkingPoints => "Talking Points",
        }
    }
}

/// Artifact URLs; absent or empty entries mean the artifact was not produced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DownloadSet {
    #[serde(deserialize_with = "lenient")]
    pub optimized_resume: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub interview_prep: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cover_letter: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub talking_points: Option<String>,
}

impl DownloadSet {
    pub fn get(&self, kind: ArtifactKind) -> Option<&str> {
        let url = match kind {
            ArtifactKind::OptimizedResume => &self.optimized_resume,
            ArtifactKind::InterviewPrep => &self.interview_prep,
            ArtifactKind::CoverLetter => &self.cover_letter,
            ArtifactKind::TalkingPoints => &self.talking_points,
        };
        non_empty(url)
    }

    /// Present artifacts in display order
    pub fn present(&self) -> impl Iterator<Item = (ArtifactKind, &str)> + '_ {
        ArtifactKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|url| (kind, url)))
    }
}

/// Leniently parsed analysis payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(deserialize_with = "lenient_object")]
    pub research_summary: Option<ResearchSummary>,
    #[serde(deserialize_with = "lenient_object")]
    pub scores: ScoreSet,
    /// The backend reports ATS at the top level rather than inside `scores`.
    #[serde(deserialize_with = "lenient")]
    pub ats_score: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub ats_warnings: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub gap_analysis: Option<String>,
    #[serde(deserialize_with = "lenient_object_list")]
    pub suggestions: Vec<Suggestion>,
    #[serde(deserialize_with = "lenient_list")]
    pub interview_questions: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub cover_letter: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub overall_summary: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub auto_applied: Option<bool>,
    #[serde(deserialize_with = "lenient_object")]
    pub edit_results: Option<EditResults>,
    #[serde(deserialize_with = "lenient_object")]
    pub downloads: DownloadSet,
}

impl AnalysisResult {
    /// Build from an arbitrary JSON value. Non-object values yield an empty
    /// result rather than an error.
    pub fn from_value(value: Value) -> Self {
        from_object(value).unwrap_or_default()
    }

    pub fn company(&self) -> Option<&str> {
        self.research_summary
            .as_ref()
            .and_then(|r| non_empty(&r.company))
    }

    pub fn cultural_tone(&self) -> Option<&str> {
        self.research_summary
            .as_ref()
            .and_then(|r| non_empty(&r.cultural_tone))
    }

    pub fn gap_analysis(&self) -> Option<&str> {
        non_empty(&self.gap_analysis)
    }

    pub fn cover_letter(&self) -> Option<&str> {
        non_empty(&self.cover_letter)
    }

    pub fn overall_summary(&self) -> Option<&str> {
        non_empty(&self.overall_summary)
    }

    /// Score for a dial, 0 when absent.
    pub fn score(&self, kind: ScoreKind) -> f64 {
        let value = match kind {
            ScoreKind::Ats => self.ats_score.or(self.scores.ats),
            ScoreKind::Skills => self.scores.skills,
            ScoreKind::Experience => self.scores.experience,
            ScoreKind::Impact => self.scores.impact,
            ScoreKind::TechnicalMatch => self.scores.technical_match,
            ScoreKind::CulturalMatch => self.scores.cultural_match,
        };
        value.unwrap_or(0.0)
    }
}
