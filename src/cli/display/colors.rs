//! Confidence and origin color mapping for CLI output.
//!
//! Styling is dropped automatically when stdout is not a terminal or
//! `NO_COLOR` is set, via the `console` crate.

use console::{style, StyledObject};

use crate::domain::models::{percent, PatternOrigin};

/// Percentage floor for green
pub const HIGH_CONFIDENCE_PERCENT: u32 = 80;

/// Percentage floor for yellow
pub const MEDIUM_CONFIDENCE_PERCENT: u32 = 50;

/// Confidence tier shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    /// Green
    High,
    /// Yellow
    Medium,
    /// Red
    Low,
}

impl ConfidenceTier {
    /// Tier for a whole-number percentage
    pub const fn from_percent(value: u32) -> Self {
        if value >= HIGH_CONFIDENCE_PERCENT {
            Self::High
        } else if value >= MEDIUM_CONFIDENCE_PERCENT {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Render a `[0, 1]` confidence as a colored percentage.
///
/// Color scheme:
/// - Green:  80% and above
/// - Yellow: 50% to 79%
/// - Red:    below 50%
pub fn colorize_confidence(confidence: f64) -> StyledObject<String> {
    let value = percent(confidence);
    let text = format!("{value}%");
    match ConfidenceTier::from_percent(value) {
        ConfidenceTier::High => style(text).green().bold(),
        ConfidenceTier::Medium => style(text).yellow(),
        ConfidenceTier::Low => style(text).red(),
    }
}

/// Registry hits in cyan, fallbacks dimmed.
pub fn colorize_origin(origin: PatternOrigin) -> StyledObject<&'static str> {
    match origin {
        PatternOrigin::Registry => style(origin.as_str()).cyan(),
        PatternOrigin::Generic => style(origin.as_str()).dim(),
    }
}
