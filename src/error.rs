//! Error Types
//!
//! Display text doubles as the user-facing toast message.

use thiserror::Error;

/// Failure talking to the board server
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server answered {status} for {path}")]
    Status { status: u16, path: String },

    #[error("unreadable response: {0}")]
    Body(String),

    #[error(transparent)]
    Fragment(#[from] FragmentError),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Server markup that does not follow the board's DOM contract
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("empty fragment")]
    Empty,

    #[error("fragment has no {0}")]
    Missing(&'static str),

    #[error("invalid {attr} value {value:?}")]
    BadId { attr: &'static str, value: String },

    #[error("browser could not parse fragment")]
    Parse,
}

/// Page-provided configuration that could not be read
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid KANBAN_CONFIG: {0}")]
    Invalid(String),
}
