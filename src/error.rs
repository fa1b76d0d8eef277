//! Error handling for rating generation

use std::io;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, RatingMillError>;

/// Main error type for RatingMill operations
#[derive(Error, Debug)]
pub enum RatingMillError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid generation parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Matrix operands with incompatible shapes
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Malformed rating line
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RatingMillError {
    /// Create an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<serde_json::Error> for RatingMillError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_context("JSON serialization failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_source() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = RatingMillError::with_context("Failed to open ratings.dat", io_err);
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to open ratings.dat"));
        assert!(msg.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_config_message() {
        let err = RatingMillError::invalid_config("rank must be at least 1");
        assert_eq!(err.to_string(), "Invalid configuration: rank must be at least 1");
    }
}
