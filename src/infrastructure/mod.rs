//! Infrastructure layer module
//!
//! Adapters and ambient concerns:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Random sources for confidence estimation
//! - Knowledge base sources
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod random;
pub mod registry;
