//! Domain layer for loginprobe
//!
//! This module contains the models, errors and port traits of the analysis
//! engine. Nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{AnalysisError, DomainError, DomainResult};
pub use ports::RegistryError;
