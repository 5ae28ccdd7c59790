//! Color tokens for the rendered page.

// --- Score tiers ---
pub const TIER_EXCELLENT: &str = "#10b981"; // green
pub const TIER_GOOD: &str = "#3b82f6"; // blue
pub const TIER_AVERAGE: &str = "#f59e0b"; // amber
pub const TIER_POOR: &str = "#ef4444"; // red

// --- Dial ---
pub const DIAL_TRACK: &str = "#e5e7eb";

// --- Page chrome ---
pub const PAGE_BG: &str = "#f8fafc";
pub const CARD_BG: &str = "#ffffff";
pub const TEXT_PRIMARY: &str = "#0f172a";
pub const TEXT_MUTED: &str = "#64748b";
pub const ACCENT: &str = "#6366f1";
pub const BEFORE_BG: &str = "#fef2f2";
pub const AFTER_BG: &str = "#ecfdf5";
