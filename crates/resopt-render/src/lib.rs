//! resopt-render - Rendering pipeline for the Resume Optimizer client
//!
//! Turns an untrusted analysis payload into safe markup and drives it into an
//! injectable [`ViewSink`]:
//! - [`markdown`]: escape-then-transform for the restricted markdown subset
//! - [`score`]: tier mapping and dial/counter animation plans
//! - [`renderer`]: populates every result panel
//! - [`downloads`]: artifact links and share hand-off URLs
//! - [`page`]: in-memory page model implementing [`ViewSink`], serializable to HTML

pub mod downloads;
pub mod escape;
pub mod markdown;
pub mod page;
pub mod palette;
pub mod renderer;
pub mod score;
pub mod sink;

pub use escape::escape_html;
pub use markdown::format_markdown;
pub use page::Page;
pub use renderer::{ArtifactLink, RenderOptions, RenderOutput, ResultRenderer};
pub use score::{
    format_score, AnimationTiming, CounterFrames, ScoreAnimation, ScoreAnimator, Tier,
    DIAL_CIRCUMFERENCE,
};
pub use sink::{Control, DialUpdate, Panel, ScrollBehavior, Slot, ViewSink};
