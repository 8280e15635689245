//! Error types for the state layer
//!
//! Almost nothing here fails: store problems degrade to defaults and detector
//! handles are idempotent. What remains are wiring mistakes, reported loudly.

use thiserror::Error;

/// State layer errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A theme consumer was mounted without a theme provider
    #[error("{consumer} used outside of a theme provider")]
    ContextMissing {
        /// Name of the consumer that performed the lookup
        consumer: &'static str,
    },

    /// A string that is not a theme value
    #[error("Unknown theme: {0}")]
    InvalidTheme(String),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;
