//! Error types for the presentation layer

use navbar_state::StateError;
use thiserror::Error;

/// Errors raised while configuring or mounting a navigation bar
#[derive(Debug, Error)]
pub enum UiError {
    /// State layer misuse (e.g. mounting without a theme provider)
    #[error(transparent)]
    State(#[from] StateError),

    /// Settings could not be parsed
    #[error("Invalid navbar settings: {0}")]
    Config(#[from] serde_json::Error),

    /// A theme color is blank or contains control characters
    #[error("Invalid color for {field}: {value}")]
    InvalidColor {
        /// Setting that holds the color
        field: &'static str,
        /// Rejected value
        value: String,
    },
}

/// Result type for presentation operations
pub type Result<T> = std::result::Result<T, UiError>;
