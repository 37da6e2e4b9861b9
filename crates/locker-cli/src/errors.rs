//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use locker_core::LockerError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Record not found
    NotFound { message: String, hint: String },

    /// Not logged in, or the backend refused the credentials
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// The backend failed or was unreachable
    Remote(String),

    /// The failure was already shown through the reporter; exit quietly.
    Reported { code: i32 },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::Remote(message) => write!(f, "{}", message),
            CliError::Reported { code } => write!(f, "failed with exit code {}", code),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Error for a core failure the reporter has already printed.
    pub fn reported(err: &LockerError) -> Self {
        CliError::Reported {
            code: exit_code_for(err),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Remote(_) => exit_codes::REMOTE_FAILED,
            CliError::Reported { code } => *code,
        }
    }

    /// The message without its hint.
    pub fn message(&self) -> String {
        match self {
            CliError::NotFound { message, .. } | CliError::AuthFailed { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

impl From<LockerError> for CliError {
    fn from(err: LockerError) -> Self {
        match err {
            LockerError::NotFound(what) => {
                CliError::not_found(format!("Not found: {}", what), "Run: locker <kind> list")
            }
            LockerError::Session(message) => {
                CliError::auth_failed_with_hint(message, "Run: locker login")
            }
            LockerError::Server {
                status: Some(401 | 403),
                message,
            } => CliError::AuthFailed {
                message,
                hint: None,
            },
            LockerError::Validation(errors) => CliError::InvalidInput(
                errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            LockerError::InvalidInput(message) => CliError::InvalidInput(message),
            other => CliError::Remote(other.to_string()),
        }
    }
}

/// Exit code a core error maps to.
pub fn exit_code_for(err: &LockerError) -> i32 {
    use super::constants::exit_codes;
    match err {
        LockerError::NotFound(_) => exit_codes::NOT_FOUND,
        LockerError::Validation(_) | LockerError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        LockerError::Session(_) => exit_codes::AUTH_FAILED,
        LockerError::Server {
            status: Some(401 | 403),
            ..
        } => exit_codes::AUTH_FAILED,
        LockerError::Server { .. } | LockerError::Network(_) | LockerError::Decode(_) => {
            exit_codes::REMOTE_FAILED
        }
        LockerError::Storage(_) => 1,
    }
}
