use std::io;
use thiserror::Error;

/// Crate-wide error type.
///
/// The decision core itself never fails for well-formed calls: analysis, scoring and
/// response generation fall back to safe defaults. Errors only surface at the edges
/// (identifier contract, configuration, persistence hooks and the actor channel).
#[derive(Debug, Error)]
pub enum CoachError {
    /// A caller passed an empty or whitespace-only user identifier.
    #[error("Invalid user identifier: must not be empty")]
    InvalidUserId,

    /// Represents data validation errors (e.g., out-of-range configuration values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors, typically from persistence hooks.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents failures talking to the coach actor (closed channel, dropped responder).
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl Clone for CoachError {
    fn clone(&self) -> Self {
        match self {
            CoachError::InvalidUserId => CoachError::InvalidUserId,
            CoachError::Validation(s) => CoachError::Validation(s.clone()),
            CoachError::Config(s) => CoachError::Config(s.clone()),
            CoachError::Io(e) => CoachError::Io(io::Error::new(e.kind(), e.to_string())),
            CoachError::Actor(s) => CoachError::Actor(s.clone()),
            CoachError::Timeout(s) => CoachError::Timeout(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for CoachError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        CoachError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for CoachError {
    fn from(err: serde_json::Error) -> Self {
        CoachError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for CoachError {
    fn from(err: validator::ValidationErrors) -> Self {
        CoachError::Validation(format!("Validation errors: {}", err))
    }
}
