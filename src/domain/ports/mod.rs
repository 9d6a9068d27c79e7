//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters implement:
//! - PatternSource: where the knowledge base document comes from
//! - RandomSource: randomness driving confidence perturbation
//!
//! These traits keep the engine independent of where patterns are stored
//! and where entropy comes from.

pub mod errors;
pub mod pattern_source;
pub mod random_source;

pub use errors::RegistryError;
pub use pattern_source::{PatternSource, RegistryDocument};
pub use random_source::RandomSource;
