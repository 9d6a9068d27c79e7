//! Knowledge base loading port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::RegistryError;
use crate::domain::models::SaaSPattern;

/// Serialized form of the knowledge base.
///
/// Keys are hostnames; they are normalized (lowercase, `www.` stripped) when
/// the registry is built, so documents may use either spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Document format version, starting at 1
    pub version: u32,

    /// Patterns keyed by hostname
    pub patterns: BTreeMap<String, SaaSPattern>,
}

/// Port for loading the knowledge base following hexagonal architecture
///
/// Adapters decide where the document lives (compiled in, a file on disk,
/// a remote store); the registry only sees the parsed document.
///
/// # Examples
///
/// ```no_run
/// use loginprobe::domain::ports::{PatternSource, RegistryError};
///
/// async fn count(source: &dyn PatternSource) -> Result<usize, RegistryError> {
///     Ok(source.load().await?.patterns.len())
/// }
/// ```
#[async_trait]
pub trait PatternSource: Send + Sync {
    /// Fetch and parse the current knowledge base document.
    async fn load(&self) -> Result<RegistryDocument, RegistryError>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}
