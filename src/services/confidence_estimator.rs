//! Bounded random perturbation of confidence scores.

use std::sync::Arc;

use crate::domain::models::{FieldKind, ScoringConfig};
use crate::domain::ports::RandomSource;

/// Service producing perturbed confidence values
///
/// Estimate formula: clamp(baseline + (u - 0.5) * jitter, 0, cap)
/// where `u` is drawn uniformly from `[0, 1)`.
#[derive(Clone)]
pub struct ConfidenceEstimator {
    random: Arc<dyn RandomSource>,
    scoring: ScoringConfig,
}

impl std::fmt::Debug for ConfidenceEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfidenceEstimator")
            .field("scoring", &self.scoring)
            .finish_non_exhaustive()
    }
}

impl ConfidenceEstimator {
    /// Create an estimator with default scoring parameters
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self::with_scoring(random, ScoringConfig::default())
    }

    /// Create an estimator with custom scoring parameters
    pub fn with_scoring(random: Arc<dyn RandomSource>, scoring: ScoringConfig) -> Self {
        Self { random, scoring }
    }

    /// Same random source, different scoring parameters.
    #[must_use]
    pub fn clone_with_scoring(&self, scoring: ScoringConfig) -> Self {
        Self::with_scoring(Arc::clone(&self.random), scoring)
    }

    /// Perturb `baseline` by up to half of `jitter_amplitude` either way.
    ///
    /// # Arguments
    /// * `baseline` - Center of the distribution
    /// * `jitter_amplitude` - Full width of the perturbation band
    /// * `cap` - Upper clamp, itself clamped to `[0, 1]`
    ///
    /// # Returns
    /// A value in `[0, cap]`
    pub fn estimate(&self, baseline: f64, jitter_amplitude: f64, cap: f64) -> f64 {
        let u = self.random.next_unit().clamp(0.0, 1.0);
        let perturbed = (u - 0.5).mul_add(jitter_amplitude.abs(), baseline);
        let cap = if cap.is_nan() { 1.0 } else { cap.clamp(0.0, 1.0) };
        if perturbed.is_nan() {
            return 0.0;
        }
        perturbed.clamp(0.0, cap)
    }

    /// Overall confidence for an analysis, rounded to two decimals.
    pub fn overall(&self) -> f64 {
        let raw = self.estimate(
            self.scoring.overall_baseline,
            self.scoring.overall_jitter,
            1.0,
        );
        (raw * 100.0).round() / 100.0
    }

    /// Confidence for one field, starting from the pattern's stored value.
    pub fn field(&self, kind: FieldKind, baseline: f64) -> f64 {
        self.estimate(baseline, self.scoring.field_jitter, self.cap_for(kind))
    }

    /// Upper clamp applied to a field's confidence
    pub const fn cap_for(&self, kind: FieldKind) -> f64 {
        match kind {
            FieldKind::Username => self.scoring.username_cap,
            FieldKind::Password => self.scoring.password_cap,
            FieldKind::Submit => self.scoring.submit_cap,
        }
    }

    /// Raw draw in `[0, 1)` from the underlying source.
    pub fn unit(&self) -> f64 {
        self.random.next_unit()
    }
}
