//! Domain errors for the loginprobe analysis engine.

use thiserror::Error;

/// Domain-level errors raised while interpreting caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// URL could not be parsed or has no host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Reasons an analysis did not produce a result.
///
/// The lenient `analyze` path never produces these; they surface only from
/// the cancellable and session-scoped entry points.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input rejected in strict URL mode
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    /// The cancellation token fired
    #[error("Analysis cancelled")]
    Cancelled,

    /// A newer request for the same session replaced this one
    #[error("Analysis superseded by a newer request in the same session")]
    Superseded,
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
