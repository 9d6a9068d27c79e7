//! Analysis results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::{DetectedElements, SelectorGroup};
use super::pattern::PatternOrigin;

/// The engine's sole output artifact for one analyzed URL.
///
/// Built once per request and never mutated afterwards; every confidence is
/// final by the time the record reaches the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// URL exactly as submitted
    pub url: String,

    /// Normalized registry key the URL resolved to
    pub domain: String,

    /// Whether the pattern came from the knowledge base or the fallback
    pub pattern_source: PatternOrigin,

    /// When the analysis completed
    pub timestamp: DateTime<Utc>,

    /// Overall confidence in `[0, 1]`, rounded to two decimals
    pub confidence: f64,

    /// Perturbed detections for the three form fields
    pub elements: DetectedElements,

    /// Supported authentication methods
    pub auth_methods: Vec<String>,

    /// Ordered selector candidates per field
    pub selectors: SelectorGroup,

    /// Advisory messages, rendered positionally by consumers
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Overall confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u32 {
        percent(self.confidence)
    }
}

/// Convert a `[0, 1]` confidence to a rounded percentage.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(confidence: f64) -> u32 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u32
}
