//! Error types for Locker core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Result type alias for Locker operations.
pub type Result<T> = std::result::Result<T, LockerError>;

/// Core error type for Locker operations.
#[derive(Debug, Error)]
pub enum LockerError {
    /// One or more form fields failed client-side validation.
    ///
    /// No request is issued when this is returned.
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// The backend answered with a failure; `message` is relayed verbatim
    /// from the response body when one was present.
    #[error("{message}")]
    Server {
        status: Option<u16>,
        message: String,
    },

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// A response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// No usable session (not logged in, or no email stored)
    #[error("Session error: {0}")]
    Session(String),

    /// Local session storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input that is not tied to a form field
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LockerError {
    /// Build a server error carrying the body message.
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        LockerError::Server {
            status,
            message: message.into(),
        }
    }

    /// Server-supplied message, if this error came from the backend.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            LockerError::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the error was raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            LockerError::Validation(_) | LockerError::Session(_) | LockerError::InvalidInput(_)
        )
    }
}

impl From<std::io::Error> for LockerError {
    fn from(err: std::io::Error) -> Self {
        LockerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LockerError {
    fn from(err: serde_json::Error) -> Self {
        LockerError::Decode(err.to_string())
    }
}

impl From<FieldErrors> for LockerError {
    fn from(errors: FieldErrors) -> Self {
        LockerError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_verbatim() {
        let err = LockerError::server(Some(401), "Invalid credentials");
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.server_message(), Some("Invalid credentials"));
        assert!(!err.is_client_side());
    }

    #[test]
    fn test_validation_is_client_side() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        let err = LockerError::from(errors);
        assert!(err.is_client_side());
        assert!(err.server_message().is_none());
    }
}
