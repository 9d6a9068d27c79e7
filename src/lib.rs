//! loginprobe - SaaS login form detection and automation script synthesis
//!
//! Given a login page URL, loginprobe identifies the username, password and
//! submit elements from a knowledge base of known SaaS login pages (or a
//! generic fallback), scores each with a bounded confidence, lists
//! fallback CSS selectors, and renders a Playwright login script.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and port traits
//! - **Service Layer** (`services`): the analysis engine
//! - **Infrastructure Layer** (`infrastructure`): config, logging, randomness, pattern files
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use loginprobe::infrastructure::random::SystemRandom;
//! use loginprobe::{generate_automation_script, AnalysisOrchestrator, PatternRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator =
//!         AnalysisOrchestrator::new(PatternRegistry::builtin(), Arc::new(SystemRandom::new()));
//!     let result = orchestrator.analyze("https://github.com/login").await;
//!     println!("{}", generate_automation_script(&result));
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AnalysisResult, Config, DetectedElements, ElementDetection, FieldKind, LatencyConfig,
    LoggingConfig, PatternOrigin, SaaSPattern, ScoringConfig, SelectorGroup,
};
pub use domain::ports::{PatternSource, RandomSource, RegistryDocument};
pub use domain::{AnalysisError, DomainError, RegistryError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::registry::{BuiltinPatternSource, FilePatternSource};
pub use services::{AnalysisOrchestrator, CodeSynthesizer, DomainResolver, PatternRegistry};

/// Render the Playwright login script for an analysis result.
///
/// Pure and total: the same result always yields the same script.
pub fn generate_automation_script(result: &AnalysisResult) -> String {
    CodeSynthesizer::new().synthesize(result)
}
