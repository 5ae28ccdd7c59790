//! Score dials: tier mapping and animation plans
//!
//! [`ScoreAnimator::animate`] applies the immediate visual state (tier color,
//! empty ring, zero counter) and returns a [`ScoreAnimation`] describing the
//! deferred work. The app layer runs that plan on timer tasks so the sink is
//! only ever mutated from the message loop.

use std::f64::consts::PI;
use std::time::Duration;

use resopt_core::ScoreKind;

use crate::palette;
use crate::sink::{DialUpdate, ViewSink};

/// Ring radius in view-box units.
pub const DIAL_RADIUS: f64 = 45.0;

/// Full ring length; the visible arc is `score / 100` of this.
pub const DIAL_CIRCUMFERENCE: f64 = 2.0 * PI * DIAL_RADIUS;

/// Score bucket driving color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Tier {
    /// Inclusive lower bounds: 80, 60, 40.
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Tier::Excellent
        } else if score >= 60.0 {
            Tier::Good
        } else if score >= 40.0 {
            Tier::Average
        } else {
            Tier::Poor
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Tier::Excellent => palette::TIER_EXCELLENT,
            Tier::Good => palette::TIER_GOOD,
            Tier::Average => palette::TIER_AVERAGE,
            Tier::Poor => palette::TIER_POOR,
        }
    }

    /// CSS class name
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Average => "average",
            Tier::Poor => "poor",
        }
    }
}

/// Animation timing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    /// Delay between applying the tier color and filling the ring
    pub stroke_delay: Duration,
    /// Total counter run time
    pub counter_duration: Duration,
    /// Counter tick interval
    pub counter_tick: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            stroke_delay: Duration::from_millis(100),
            counter_duration: Duration::from_millis(1500),
            counter_tick: Duration::from_millis(20),
        }
    }
}

/// Clamp to 0-100; non-finite values become 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Counter text for a score value.
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAnimator {
    timing: AnimationTiming,
}

impl ScoreAnimator {
    pub fn new(timing: AnimationTiming) -> Self {
        Self { timing }
    }

    /// Apply the dial's starting state and return the deferred plan.
    pub fn animate(&self, kind: ScoreKind, score: f64, sink: &mut dyn ViewSink) -> ScoreAnimation {
        let target = clamp_score(score);
        let tier = Tier::for_score(target);

        sink.update_dial(kind, DialUpdate::Tier(tier));
        sink.update_dial(
            kind,
            DialUpdate::Stroke {
                dash_offset: DIAL_CIRCUMFERENCE,
            },
        );
        sink.update_dial(kind, DialUpdate::Value("0".to_string()));

        ScoreAnimation {
            kind,
            target,
            tier,
            timing: self.timing,
        }
    }
}

/// Deferred half of a dial animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAnimation {
    pub kind: ScoreKind,
    /// Clamped target score
    pub target: f64,
    pub tier: Tier,
    pub timing: AnimationTiming,
}

impl ScoreAnimation {
    /// Final ring offset once the stroke is filled.
    pub fn dash_offset(&self) -> f64 {
        DIAL_CIRCUMFERENCE * (1.0 - self.target / 100.0)
    }

    pub fn stroke_update(&self) -> DialUpdate {
        DialUpdate::Stroke {
            dash_offset: self.dash_offset(),
        }
    }

    pub fn stroke_delay(&self) -> Duration {
        self.timing.stroke_delay
    }

    pub fn tick_interval(&self) -> Duration {
        self.timing.counter_tick
    }

    pub fn counter(&self) -> CounterFrames {
        CounterFrames::new(
            self.target,
            self.timing.counter_duration,
            self.timing.counter_tick,
        )
    }
}

/// Counter text for each tick, ending on the exact target.
#[derive(Debug, Clone)]
pub struct CounterFrames {
    target: f64,
    increment: f64,
    steps: u64,
    step: u64,
    done: bool,
}

impl CounterFrames {
    pub fn new(target: f64, duration: Duration, tick: Duration) -> Self {
        let tick_ms = tick.as_millis().max(1);
        let steps = (duration.as_millis() / tick_ms).max(1) as u64;
        Self {
            target,
            increment: target / steps as f64,
            steps,
            step: 0,
            done: false,
        }
    }
}

impl Iterator for CounterFrames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        self.step += 1;
        let current = self.increment * self.step as f64;
        if self.step >= self.steps || current >= self.target {
            self.done = true;
            return Some(format_score(self.target));
        }

        Some(format!("{:.0}", current.round()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_score(0.0), Tier::Poor);
        assert_eq!(Tier::for_score(39.0), Tier::Poor);
        assert_eq!(Tier::for_score(39.9), Tier::Poor);
        assert_eq!(Tier::for_score(40.0), Tier::Average);
        assert_eq!(Tier::for_score(59.0), Tier::Average);
        assert_eq!(Tier::for_score(60.0), Tier::Good);
        assert_eq!(Tier::for_score(79.0), Tier::Good);
        assert_eq!(Tier::for_score(80.0), Tier::Excellent);
        assert_eq!(Tier::for_score(100.0), Tier::Excellent);
    }

    #[test]
    fn test_tier_colors_are_distinct() {
        let colors = [
            Tier::Excellent.color(),
            Tier::Good.color(),
            Tier::Average.color(),
            Tier::Poor.color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 0.0);
        assert_eq!(clamp_score(72.5), 72.5);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(85.0), "85");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(84.5), "84.5");
    }

    #[test]
    fn test_dash_offset_fraction_of_circumference() {
        let mut page = Page::new();
        let anim = ScoreAnimator::default().animate(ScoreKind::Skills, 75.0, &mut page);
        assert!((anim.dash_offset() - DIAL_CIRCUMFERENCE * 0.25).abs() < 1e-9);

        let full = ScoreAnimator::default().animate(ScoreKind::Skills, 100.0, &mut page);
        assert!(full.dash_offset().abs() < 1e-9);
    }

    #[test]
    fn test_animate_applies_starting_state() {
        let mut page = Page::new();
        let anim = ScoreAnimator::default().animate(ScoreKind::Impact, 120.0, &mut page);

        assert_eq!(anim.target, 100.0);
        assert_eq!(anim.tier, Tier::Excellent);

        let dial = page.dial(ScoreKind::Impact).unwrap();
        assert_eq!(dial.tier, Some(Tier::Excellent));
        assert_eq!(dial.dash_offset, DIAL_CIRCUMFERENCE);
        assert_eq!(dial.value, "0");
    }

    #[test]
    fn test_counter_ends_on_target() {
        let frames: Vec<_> = CounterFrames::new(
            85.0,
            Duration::from_millis(1500),
            Duration::from_millis(20),
        )
        .collect();

        assert_eq!(frames.len(), 75);
        assert_eq!(frames.last().map(String::as_str), Some("85"));
        assert_eq!(frames[0], "1");
    }

    #[test]
    fn test_counter_is_monotonic() {
        let values: Vec<f64> = CounterFrames::new(
            63.0,
            Duration::from_millis(1500),
            Duration::from_millis(20),
        )
        .map(|f| f.parse().unwrap())
        .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 63.0);
    }

    #[test]
    fn test_counter_zero_target_single_frame() {
        let frames: Vec<_> =
            CounterFrames::new(0.0, Duration::from_millis(1500), Duration::from_millis(20))
                .collect();
        assert_eq!(frames, vec!["0"]);
    }

    #[test]
    fn test_counter_tick_longer_than_duration() {
        let frames: Vec<_> =
            CounterFrames::new(50.0, Duration::from_millis(10), Duration::from_millis(20))
                .collect();
        assert_eq!(frames, vec!["50"]);
    }
}
