//! Error types for CorpusQA.
//!
//! This module defines a unified error enum covering every error category in
//! the application: configuration, I/O, the three external capabilities
//! (document index, web search, generator), and the session-internal kinds.
//!
//! The propagation policy is deliberately asymmetric: index, search, and
//! generator failures are caught at the orchestrator boundary and degraded to
//! empty-or-canned results; `EmptyContext` and `InvalidCitation` never leave
//! the session crate at all.

use thiserror::Error;

/// Unified error type for CorpusQA.
///
/// All fallible functions return `Result<T, AppError>`. We never panic —
/// errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document index is not loaded or not reachable
    #[error("Document index unavailable: {0}")]
    IndexUnavailable(String),

    /// Web search transport, auth, or quota errors
    #[error("Web search failed: {0}")]
    SearchFailure(String),

    /// Generator transport, quota, or timeout errors
    #[error("Generation failed: {0}")]
    GeneratorFailure(String),

    /// No usable passages were retrieved for a query
    #[error("No usable context for query: {0}")]
    EmptyContext(String),

    /// A citation marker with no matching passage in the generation context
    #[error("Citation {0} does not match any passage in context")]
    InvalidCitation(String),

    /// Session-level misuse (e.g. empty question)
    #[error("Session error: {0}")]
    Session(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
