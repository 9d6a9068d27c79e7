//! Fallback pattern for domains missing from the knowledge base.

use tracing::debug;

use crate::domain::models::{ElementDetection, SaaSPattern, SelectorGroup};
use crate::services::confidence_estimator::ConfidenceEstimator;

/// Center and width of the fallback baseline band (0.75 to 0.90).
const GENERIC_BASELINE: f64 = 0.825;
const GENERIC_JITTER: f64 = 0.15;

/// Offset applied to the password (up) and submit (down) baselines.
const FIELD_OFFSET: f64 = 0.05;

/// Builds a fallback pattern from generic login-form conventions
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericPatternSynthesizer;

impl GenericPatternSynthesizer {
    /// Create a synthesizer
    pub const fn new() -> Self {
        Self
    }

    /// Synthesize a pattern for a URL with no knowledge-base entry.
    ///
    /// The URL does not influence the selectors; it is only logged.
    pub fn synthesize(&self, url: &str, estimator: &ConfidenceEstimator) -> SaaSPattern {
        let baseline = estimator.estimate(GENERIC_BASELINE, GENERIC_JITTER, 1.0);
        debug!(url, baseline, "synthesizing generic login pattern");

        SaaSPattern {
            username: ElementDetection::new(
                "#username",
                baseline,
                "input",
                Some("Username/Email"),
            ),
            password: ElementDetection::new(
                "#password",
                (baseline + FIELD_OFFSET).clamp(0.0, 1.0),
                "password",
                Some("Password"),
            ),
            submit: ElementDetection::new(
                "button[type=\"submit\"]",
                (baseline - FIELD_OFFSET).clamp(0.0, 1.0),
                "button",
                Some("Sign in"),
            ),
            auth_methods: vec!["Username/Password".to_string(), "SSO".to_string()],
            specific_selectors: SelectorGroup::new(
                &[
                    "#username",
                    "[name=\"username\"]",
                    "[name=\"email\"]",
                    ".username-input",
                ],
                &["#password", "[type=\"password\"]", ".password-field"],
                &["button[type=\"submit\"]", ".login-btn", ".signin-button"],
            ),
        }
    }
}
