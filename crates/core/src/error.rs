//! Error Handling
//!
//! Unified error type for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::models::InterviewKind;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// No active interview session for the user
    #[error("No active interview session")]
    NoSession,

    /// An interview of the given kind is already running for the user
    #[error("An interview is already active: {0}")]
    AlreadyActive(InterviewKind),

    /// Unsupported interview kind requested at the transport boundary
    #[error("Invalid interview kind: {0}")]
    InvalidKind(String),

    /// Finalize called against a session of the other kind
    #[error("Wrong interview kind: expected {expected}, session is {actual}")]
    WrongKind {
        expected: InterviewKind,
        actual: InterviewKind,
    },

    /// The extraction collaborator failed or returned unusable output
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::database("connection failed");
        assert_eq!(err.to_string(), "Database error: connection failed");

        let err = AppError::NoSession;
        assert_eq!(err.to_string(), "No active interview session");
    }

    #[test]
    fn test_wrong_kind_display() {
        let err = AppError::WrongKind {
            expected: InterviewKind::Profile,
            actual: InterviewKind::Task,
        };
        assert!(err.to_string().contains("expected profile"));
        assert!(err.to_string().contains("session is task"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let app_err: AppError = serde_err.into();
        assert!(matches!(app_err, AppError::Serialization(_)));
    }
}
