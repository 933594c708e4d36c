/// Error types for Interview Coach
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

use crate::domain::models::SessionState;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Speech capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Question fetch error: {0}")]
    QuestionFetch(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Action '{action}' is not valid in state {state}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
