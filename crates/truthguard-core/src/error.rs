//! Centralized error types for TruthGuard.

use thiserror::Error;

/// Main error type for TruthGuard operations.
#[derive(Error, Debug)]
pub enum TruthguardError {
    #[error("No content provided for analysis")]
    NoContent,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI credits exhausted. Please add credits to continue.")]
    CreditsExhausted,

    #[error("AI Gateway error: {status} {body}")]
    Gateway { status: u16, body: String },

    #[error("Invalid file type: {0} (please upload an image file such as JPG, PNG or WEBP)")]
    InvalidFileType(String),

    #[error("File too large: {size} bytes (please upload an image smaller than {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("An analysis is already in progress")]
    InFlight,

    #[error("{0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Endpoint(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for TruthGuard operations.
pub type TruthguardResult<T> = Result<T, TruthguardError>;

impl TruthguardError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
