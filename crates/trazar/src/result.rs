//! Result and error types for Trazar.

use thiserror::Error;

/// Result type for Trazar operations
pub type TrazarResult<T> = Result<T, TrazarError>;

/// Errors that can occur in Trazar
#[derive(Debug, Error)]
pub enum TrazarError {
    /// Request rejected before dispatch (the only fast-fail path)
    #[error("Invalid generation request: {message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// A domain generator failed; the router catches this and continues
    #[error("{domain} generator failed: {message}")]
    GeneratorFailed {
        /// Domain that failed
        domain: String,
        /// Error message
        message: String,
    },

    /// Instruction text could not be parsed into the requested structure
    #[error("Instruction parse error: {message}")]
    ParseError {
        /// Error message
        message: String,
    },

    /// Script emission failed
    #[error("Code emission failed: {message}")]
    EmissionError {
        /// Error message
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrazarError {
    /// Create an invalid-request error
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a generator-failed error
    #[must_use]
    pub fn generator_failed(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GeneratorFailed {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create an emission error
    #[must_use]
    pub fn emission(message: impl Into<String>) -> Self {
        Self::EmissionError {
            message: message.into(),
        }
    }
}
