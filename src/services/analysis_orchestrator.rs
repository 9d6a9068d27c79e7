//! Analysis orchestration
//!
//! Composes the engine into a single `analyze` operation:
//!
//! 1. Optional simulated latency
//! 2. Resolve the URL to a registry key
//! 3. Look up the pattern, or synthesize the generic fallback
//! 4. Estimate overall and per-field confidence
//! 5. Derive recommendations
//! 6. Stamp the completion time
//!
//! The lenient [`AnalysisOrchestrator::analyze`] always produces a result.
//! The cancellable and session-scoped variants consult a
//! [`CancellationToken`] between steps and can report why they stopped.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::errors::AnalysisError;
use crate::domain::models::{
    AnalysisResult, Config, DetectedElements, FieldKind, LatencyConfig, PatternOrigin,
    SaaSPattern, ScoringConfig,
};
use crate::domain::ports::{PatternSource, RandomSource, RegistryError};
use crate::services::confidence_estimator::ConfidenceEstimator;
use crate::services::domain_resolver::DomainResolver;
use crate::services::generic_pattern::GenericPatternSynthesizer;
use crate::services::pattern_registry::PatternRegistry;
use crate::services::recommendation_engine::RecommendationEngine;

/// In-flight analysis registered for a session.
struct SessionSlot {
    generation: u64,
    token: CancellationToken,
}

type SessionMap = Mutex<HashMap<Uuid, SessionSlot>>;

/// Releases a session slot when its analysis finishes or is dropped.
///
/// Only removes the slot if it still belongs to the same generation, so a
/// newer request for the session keeps its registration.
struct SessionGuard<'a> {
    sessions: &'a SessionMap,
    session_id: Uuid,
    generation: u64,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if sessions
            .get(&self.session_id)
            .is_some_and(|slot| slot.generation == self.generation)
        {
            sessions.remove(&self.session_id);
        }
    }
}

/// Service running login-page analyses
pub struct AnalysisOrchestrator {
    registry: RwLock<Arc<PatternRegistry>>,
    resolver: DomainResolver,
    generic: GenericPatternSynthesizer,
    estimator: ConfidenceEstimator,
    recommender: RecommendationEngine,
    latency: LatencyConfig,
    strict_urls: bool,
    sessions: SessionMap,
    next_generation: AtomicU64,
}

impl std::fmt::Debug for AnalysisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOrchestrator")
            .field("estimator", &self.estimator)
            .field("latency", &self.latency)
            .field("strict_urls", &self.strict_urls)
            .finish_non_exhaustive()
    }
}

impl AnalysisOrchestrator {
    /// Create an orchestrator with default scoring and no latency
    pub fn new(registry: PatternRegistry, random: Arc<dyn RandomSource>) -> Self {
        Self {
            registry: RwLock::new(Arc::new(registry)),
            resolver: DomainResolver::new(),
            generic: GenericPatternSynthesizer::new(),
            estimator: ConfidenceEstimator::new(random),
            recommender: RecommendationEngine::new(),
            latency: LatencyConfig::default(),
            strict_urls: false,
            sessions: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Create an orchestrator wired from loaded configuration
    pub fn from_config(
        config: &Config,
        registry: PatternRegistry,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self::new(registry, random)
            .with_scoring(config.scoring.clone())
            .with_latency(config.latency.clone())
            .with_strict_urls(config.strict_urls)
    }

    /// Replace the scoring parameters
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.estimator = self.estimator.clone_with_scoring(scoring);
        self
    }

    /// Simulate page-load latency before each analysis
    #[must_use]
    pub fn with_latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    /// Reject unparsable URLs on the cancellable paths
    #[must_use]
    pub fn with_strict_urls(mut self, strict: bool) -> Self {
        self.strict_urls = strict;
        self
    }

    /// Current knowledge base snapshot.
    pub fn registry(&self) -> Arc<PatternRegistry> {
        let guard = self
            .registry
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the knowledge base with a freshly loaded one.
    ///
    /// Analyses already running keep the snapshot they started with. On
    /// error the current registry stays in place.
    pub async fn reload_registry(&self, source: &dyn PatternSource) -> Result<usize, RegistryError> {
        let document = source.load().await?;
        let registry = PatternRegistry::from_document(document)?;
        let count = registry.len();
        let version = registry.version();

        {
            let mut guard = self
                .registry
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *guard = Arc::new(registry);
        }

        info!(source = %source.describe(), patterns = count, version, "pattern registry reloaded");
        Ok(count)
    }

    /// Analyze a URL. Never fails: malformed input degrades to the generic
    /// pattern.
    #[instrument(skip(self))]
    pub async fn analyze(&self, url: &str) -> AnalysisResult {
        let delay = self.latency_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let domain = self.resolver.resolve(url);
        let (pattern, origin) = self.select_pattern(url, &domain);
        self.score(url, domain, &pattern, origin)
    }

    /// Analyze a URL, stopping early once `token` is cancelled.
    ///
    /// With strict URL mode enabled, unparsable input is reported as
    /// [`AnalysisError::InvalidInput`] instead of using the fallback.
    #[instrument(skip(self, token))]
    pub async fn analyze_with_cancellation(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        ensure_active(token)?;

        let delay = self.latency_delay();
        if !delay.is_zero() {
            tokio::select! {
                () = token.cancelled() => return Err(AnalysisError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
        ensure_active(token)?;

        let domain = if self.strict_urls {
            self.resolver.try_resolve(url)?
        } else {
            self.resolver.resolve(url)
        };
        let (pattern, origin) = self.select_pattern(url, &domain);
        ensure_active(token)?;

        let result = self.score(url, domain, &pattern, origin);
        ensure_active(token)?;
        Ok(result)
    }

    /// Analyze a URL on behalf of a session.
    ///
    /// Starting a new analysis for the same session cancels the previous
    /// in-flight one, which then returns [`AnalysisError::Superseded`].
    pub async fn analyze_in_session(
        &self,
        session_id: Uuid,
        url: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let (guard, token) = self.begin_session(session_id);

        let outcome = self.analyze_with_cancellation(url, &token).await;
        drop(guard);

        match outcome {
            Err(AnalysisError::Cancelled) => {
                debug!(%session_id, url, "analysis superseded");
                Err(AnalysisError::Superseded)
            }
            other => other,
        }
    }

    /// Number of sessions with an analysis in flight.
    pub fn active_sessions(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn begin_session(&self, session_id: Uuid) -> (SessionGuard<'_>, CancellationToken) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = sessions.insert(
            session_id,
            SessionSlot {
                generation,
                token: token.clone(),
            },
        ) {
            previous.token.cancel();
        }
        drop(sessions);

        let guard = SessionGuard {
            sessions: &self.sessions,
            session_id,
            generation,
        };
        (guard, token)
    }

    fn latency_delay(&self) -> Duration {
        let jitter = if self.latency.jitter_ms == 0 {
            0
        } else {
            scale_jitter(self.estimator.unit(), self.latency.jitter_ms)
        };
        Duration::from_millis(self.latency.base_ms.saturating_add(jitter))
    }

    fn select_pattern(&self, url: &str, domain: &str) -> (SaaSPattern, PatternOrigin) {
        let registry = self.registry();
        match registry.lookup(domain) {
            Some(pattern) => {
                debug!(domain, "pattern registry hit");
                (pattern.clone(), PatternOrigin::Registry)
            }
            None => {
                debug!(domain, "no registry entry, using generic pattern");
                (
                    self.generic.synthesize(url, &self.estimator),
                    PatternOrigin::Generic,
                )
            }
        }
    }

    fn score(
        &self,
        url: &str,
        domain: String,
        pattern: &SaaSPattern,
        origin: PatternOrigin,
    ) -> AnalysisResult {
        let confidence = self.estimator.overall();

        let perturb = |kind: FieldKind| {
            let element = pattern.element(kind);
            element.with_confidence(self.estimator.field(kind, element.confidence))
        };
        let elements = DetectedElements {
            username: perturb(FieldKind::Username),
            password: perturb(FieldKind::Password),
            submit: perturb(FieldKind::Submit),
        };

        let recommendations = self.recommender.recommend(confidence, pattern);

        info!(
            domain = %domain,
            source = origin.as_str(),
            confidence,
            "analysis complete"
        );

        AnalysisResult {
            url: url.to_string(),
            domain,
            pattern_source: origin,
            timestamp: Utc::now(),
            confidence,
            elements,
            auth_methods: pattern.auth_methods.clone(),
            selectors: pattern.specific_selectors.clone(),
            recommendations,
        }
    }
}

fn ensure_active(token: &CancellationToken) -> Result<(), AnalysisError> {
    if token.is_cancelled() {
        Err(AnalysisError::Cancelled)
    } else {
        Ok(())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scale_jitter(unit: f64, jitter_ms: u64) -> u64 {
    (unit.clamp(0.0, 1.0) * jitter_ms as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::random::{SeededRandom, SequenceRandom};
    use crate::services::recommendation_engine::{HIGH_CONFIDENCE, SSO_REDIRECTS};

    fn orchestrator(values: &[f64]) -> AnalysisOrchestrator {
        AnalysisOrchestrator::new(
            PatternRegistry::builtin(),
            Arc::new(SequenceRandom::new(values.to_vec())),
        )
    }

    #[tokio::test]
    async fn test_registry_hit_keeps_selectors() {
        let result = orchestrator(&[0.5]).analyze("https://github.com/login").await;
        assert_eq!(result.domain, "github.com");
        assert_eq!(result.pattern_source, PatternOrigin::Registry);
        assert_eq!(result.elements.username.selector, "#login_field");
        assert_eq!(result.elements.password.selector, "#password");
        assert!(result.auth_methods.contains(&"SSO".to_string()));
        assert!(result.recommendations.contains(&SSO_REDIRECTS.to_string()));
    }

    #[tokio::test]
    async fn test_midpoint_draws_keep_baselines() {
        let result = orchestrator(&[0.5]).analyze("https://github.com/login").await;
        assert!((result.confidence - 0.83).abs() < 1e-9 || (result.confidence - 0.82).abs() < 1e-9);
        assert!((result.elements.username.confidence - 0.95).abs() < 1e-9);
        assert!((result.elements.password.confidence - 0.98).abs() < 1e-9);
        assert!((result.elements.submit.confidence - 0.90).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_high_draw_gives_ready_tier() {
        // overall = 0.825 + 0.4 * 0.25 = 0.925
        let result = orchestrator(&[0.9]).analyze("https://trello.com/login").await;
        assert_eq!(result.recommendations[0], HIGH_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_unknown_domain_uses_generic_pattern() {
        let result = orchestrator(&[0.5])
            .analyze("https://unknown-startup.example")
            .await;
        assert_eq!(result.pattern_source, PatternOrigin::Generic);
        assert_eq!(result.elements.username.selector, "#username");
        assert_eq!(result.auth_methods, vec!["Username/Password", "SSO"]);
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_malformed_url() {
        let orchestrator = orchestrator(&[0.5]).with_strict_urls(true);
        let token = CancellationToken::new();
        let err = orchestrator
            .analyze_with_cancellation("not a url", &token)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));

        // The lenient path still degrades gracefully.
        let result = orchestrator.analyze("not a url").await;
        assert_eq!(result.domain, "unknown.com");
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_analysis() {
        let token = CancellationToken::new();
        token.cancel();
        let err = orchestrator(&[0.5])
            .analyze_with_cancellation("https://github.com/login", &token)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_latency() {
        let orchestrator = Arc::new(orchestrator(&[0.5]).with_latency(LatencyConfig {
            base_ms: 2_000,
            jitter_ms: 0,
        }));
        let token = CancellationToken::new();

        let task = {
            let orchestrator = Arc::clone(&orchestrator);
            let token = token.clone();
            tokio::spawn(async move {
                orchestrator
                    .analyze_with_cancellation("https://github.com/login", &token)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();

        let outcome = task.await.unwrap();
        assert!(matches!(outcome, Err(AnalysisError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_session_request_supersedes_old() {
        let orchestrator = Arc::new(orchestrator(&[0.5]).with_latency(LatencyConfig {
            base_ms: 1_000,
            jitter_ms: 0,
        }));
        let session = Uuid::new_v4();

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                orchestrator
                    .analyze_in_session(session, "https://github.com/login")
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = orchestrator
            .analyze_in_session(session, "https://slack.com/signin")
            .await
            .unwrap();

        assert!(matches!(first.await.unwrap(), Err(AnalysisError::Superseded)));
        assert_eq!(second.domain, "slack.com");
        assert_eq!(orchestrator.active_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_session_requests_release_slots() {
        let orchestrator = Arc::new(orchestrator(&[0.5]).with_latency(LatencyConfig {
            base_ms: 2_000,
            jitter_ms: 0,
        }));

        let tasks: Vec<_> = (0..3)
            .map(|_| {
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move {
                    orchestrator
                        .analyze_in_session(Uuid::new_v4(), "https://github.com/login")
                        .await
                })
            })
            .collect();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(orchestrator.active_sessions(), 3);

        for task in tasks {
            task.abort();
            assert!(task.await.unwrap_err().is_cancelled());
        }
        assert_eq!(orchestrator.active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_seeded_runs_are_reproducible() {
        let run = |seed| async move {
            AnalysisOrchestrator::new(PatternRegistry::builtin(), Arc::new(SeededRandom::new(seed)))
                .analyze("https://notion.so/login")
                .await
        };
        let a = run(7).await;
        let b = run(7).await;
        assert!((a.confidence - b.confidence).abs() < f64::EPSILON);
        assert_eq!(a.elements, b.elements);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn test_scale_jitter() {
        assert_eq!(scale_jitter(0.0, 1_000), 0);
        assert_eq!(scale_jitter(0.5, 1_000), 500);
        assert_eq!(scale_jitter(2.0, 1_000), 1_000);
    }
}
