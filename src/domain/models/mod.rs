//! Domain models.

pub mod analysis;
pub mod config;
pub mod element;
pub mod pattern;

pub use analysis::{percent, AnalysisResult};
pub use config::{Config, LatencyConfig, LoggingConfig, ScoringConfig};
pub use element::{DetectedElements, ElementDetection, FieldKind, SelectorGroup};
pub use pattern::{PatternOrigin, SaaSPattern, SSO_AUTH_METHOD};
