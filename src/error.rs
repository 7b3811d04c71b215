//! Error handling for the ready2intern client

use crate::input::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx answer from the backend. `message` is already the best
    /// user-facing text the payload offered.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("No session ID provided")]
    MissingSession,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl AppError {
    /// Text suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Failed to connect to backend API".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            let endpoint = err
                .url()
                .map(|u| u.path().to_string())
                .unwrap_or_else(|| "unknown endpoint".to_string());
            AppError::MalformedResponse {
                endpoint,
                reason: err.to_string(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}
