//! Configuration types for the Resume Optimizer client
//!
//! Defines `Settings` and its sections, mirroring `.resopt/config.toml`.

use std::time::Duration;

use resopt_core::prelude::*;
use resopt_core::{ProgressStage, DEFAULT_STAGES, STAGE_COUNT};
use resopt_render::downloads::DEFAULT_SHARE_BASE;
use resopt_render::{AnimationTiming, RenderOptions};
use serde::{Deserialize, Serialize};
use url::Url;

/// Global settings from `.resopt/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub progress: ProgressSettings,

    #[serde(default)]
    pub animation: AnimationSettings,

    #[serde(default)]
    pub share: ShareSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL of the analysis service
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgressSettings {
    /// Nominal duration of each of the five stages
    #[serde(default = "default_stage_durations")]
    pub stage_durations_ms: Vec<u64>,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            stage_durations_ms: default_stage_durations(),
        }
    }
}

fn default_stage_durations() -> Vec<u64> {
    DEFAULT_STAGES
        .iter()
        .map(|s| s.duration.as_millis() as u64)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnimationSettings {
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,

    #[serde(default = "default_counter_tick_ms")]
    pub counter_tick_ms: u64,

    #[serde(default = "default_stroke_delay_ms")]
    pub stroke_delay_ms: u64,

    #[serde(default = "default_suggestion_stagger_ms")]
    pub suggestion_stagger_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            counter_duration_ms: default_counter_duration_ms(),
            counter_tick_ms: default_counter_tick_ms(),
            stroke_delay_ms: default_stroke_delay_ms(),
            suggestion_stagger_ms: default_suggestion_stagger_ms(),
        }
    }
}

fn default_counter_duration_ms() -> u64 {
    1500
}

fn default_counter_tick_ms() -> u64 {
    20
}

fn default_stroke_delay_ms() -> u64 {
    100
}

fn default_suggestion_stagger_ms() -> u64 {
    100
}

impl AnimationSettings {
    pub fn timing(&self) -> AnimationTiming {
        AnimationTiming {
            stroke_delay: Duration::from_millis(self.stroke_delay_ms),
            counter_duration: Duration::from_millis(self.counter_duration_ms),
            // A zero tick would spin the counter task
            counter_tick: Duration::from_millis(self.counter_tick_ms.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShareSettings {
    /// Prefix the encoded share text is appended to
    #[serde(default = "default_share_base")]
    pub base_url: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: default_share_base(),
        }
    }
}

fn default_share_base() -> String {
    DEFAULT_SHARE_BASE.to_string()
}

impl Settings {
    /// Parsed server base URL; only http(s) is accepted.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.server.base_url.trim())
            .map_err(|_| Error::invalid_endpoint(self.server.base_url.clone()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(Error::invalid_endpoint(self.server.base_url.clone())),
        }
    }

    /// Stage timeline with configured durations, or the defaults when the
    /// configured list does not have exactly one entry per stage.
    pub fn stages(&self) -> [ProgressStage; STAGE_COUNT] {
        let mut stages = DEFAULT_STAGES;
        let durations = &self.progress.stage_durations_ms;

        if durations.len() == STAGE_COUNT {
            for (stage, ms) in stages.iter_mut().zip(durations) {
                stage.duration = Duration::from_millis(*ms);
            }
        } else {
            warn!(
                "progress.stage_durations_ms needs {} values, got {}; using defaults",
                STAGE_COUNT,
                durations.len()
            );
        }

        stages
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            base_url: Some(self.base_url()?),
            suggestion_stagger: Duration::from_millis(self.animation.suggestion_stagger_ms),
            share_base: self.share.base_url.clone(),
            timing: self.animation.timing(),
        })
    }
}
