//! Constants used throughout the CLI.

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LOCKER_CONFIG";

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Record not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments, including failed form validation.
    pub const INVALID_INPUT: i32 = 4;

    /// Not logged in, or the backend rejected the credentials.
    pub const AUTH_FAILED: i32 = 5;

    /// The backend failed or could not be reached.
    pub const REMOTE_FAILED: i32 = 6;
}
