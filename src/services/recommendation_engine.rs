//! Advisory messages derived from a scored pattern.

use crate::domain::models::SaaSPattern;

/// Overall confidence above 0.85
pub const HIGH_CONFIDENCE: &str = "High confidence detection - ready for automation";
/// Overall confidence above 0.70
pub const GOOD_CONFIDENCE: &str = "Good detection accuracy - minor validation recommended";
/// Overall confidence at or below 0.70
pub const MODERATE_CONFIDENCE: &str = "Moderate confidence - manual verification suggested";
/// Username field has more than one selector candidate
pub const MULTIPLE_SELECTORS: &str = "Multiple selector options available for robust automation";
/// Pattern lists SSO
pub const SSO_REDIRECTS: &str = "SSO authentication detected - handle redirects appropriately";
/// Pattern lists more than two auth methods
pub const AUTH_FALLBACKS: &str = "Multiple auth methods available - implement fallback strategies";

/// Lower bounds (exclusive) of the high and good confidence tiers.
const HIGH_TIER_FLOOR: f64 = 0.85;
const GOOD_TIER_FLOOR: f64 = 0.70;

/// Derives ordered advisory messages for an analysis
///
/// Rules are additive and applied in order:
/// 1. exactly one confidence tier message
/// 2. the multiple-selector note
/// 3. an SSO redirect advisory when the pattern lists `SSO`
/// 4. a fallback advisory when more than two auth methods exist
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Create a recommendation engine
    pub const fn new() -> Self {
        Self
    }

    /// Recommendations for a pattern scored at `overall_confidence`
    pub fn recommend(&self, overall_confidence: f64, pattern: &SaaSPattern) -> Vec<String> {
        let mut recommendations = Vec::with_capacity(4);

        recommendations.push(tier_message(overall_confidence).to_string());
        recommendations.push(MULTIPLE_SELECTORS.to_string());

        if pattern.supports_sso() {
            recommendations.push(SSO_REDIRECTS.to_string());
        }

        if pattern.auth_methods.len() > 2 {
            recommendations.push(AUTH_FALLBACKS.to_string());
        }

        recommendations
    }
}

/// Tier message for an overall confidence value.
pub fn tier_message(confidence: f64) -> &'static str {
    if confidence > HIGH_TIER_FLOOR {
        HIGH_CONFIDENCE
    } else if confidence > GOOD_TIER_FLOOR {
        GOOD_CONFIDENCE
    } else {
        MODERATE_CONFIDENCE
    }
}
