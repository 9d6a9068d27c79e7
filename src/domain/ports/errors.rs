//! Errors raised by port adapters.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::models::FieldKind;

/// Knowledge base loading and validation errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Pattern file could not be read
    #[error("Failed to read pattern file {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid YAML or JSON
    #[error("Failed to parse pattern document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Document version other than 1
    #[error("Unsupported pattern document version: {0}")]
    UnsupportedVersion(u32),

    /// Two keys normalize to the same domain
    #[error("Duplicate domain after normalization: {0}")]
    DuplicateDomain(String),

    /// A field has no selector candidates
    #[error("Pattern for {domain} has no {field} selector candidates")]
    EmptySelectors {
        /// Offending registry key
        domain: String,
        /// Field without candidates
        field: FieldKind,
    },

    /// A selector candidate is blank
    #[error("Pattern for {domain} has a blank {field} selector")]
    BlankSelector {
        /// Offending registry key
        domain: String,
        /// Field holding the blank candidate
        field: FieldKind,
    },

    /// A stored confidence is outside `[0, 1]`
    #[error("Pattern for {domain} has {field} confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange {
        /// Offending registry key
        domain: String,
        /// Field with the bad confidence
        field: FieldKind,
        /// Stored confidence
        value: f64,
    },

    /// Key is blank or not a host name
    #[error("Invalid domain key: {0:?}")]
    InvalidDomain(String),
}
