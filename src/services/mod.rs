//! Analysis engine services.

pub mod analysis_orchestrator;
pub mod code_synthesizer;
pub mod confidence_estimator;
pub mod domain_resolver;
pub mod generic_pattern;
pub mod pattern_registry;
pub mod recommendation_engine;

pub use analysis_orchestrator::AnalysisOrchestrator;
pub use code_synthesizer::CodeSynthesizer;
pub use confidence_estimator::ConfidenceEstimator;
pub use domain_resolver::{normalize_domain, DomainResolver, UNKNOWN_DOMAIN};
pub use generic_pattern::GenericPatternSynthesizer;
pub use pattern_registry::PatternRegistry;
pub use recommendation_engine::RecommendationEngine;
