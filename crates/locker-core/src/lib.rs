//! # Locker Core
//!
//! Core library for Locker - a client for a personal digital locker holding
//! notes, links, credentials and files.
//!
//! The backend owns all data. This crate validates forms, keeps the local
//! session, and drives the screens against a remote HTTP API.
//!
//! ## Architecture
//!
//! - **storage**: Session persistence over a key-value backend
//! - **validation**: Form validation rules
//! - **models**: Wire records and form drafts
//! - **gateway**: The remote API seam and its HTTP implementation
//! - **context**: The current user, resolved once per session
//! - **auth**: Login, signup, MPIN and account flows
//! - **screens**: List screens for the four record kinds
//! - **search**: Dashboard search
//! - **report** / **navigation**: Where flows send notices and routes
//!
//! ## Security notes
//!
//! Credential passwords are stored and sent in plain text by the backend.
//! List filtering by owner happens client-side and is not an access control.

pub mod auth;
pub mod context;
pub mod error;
pub mod fs;
pub mod gateway;
pub mod models;
pub mod navigation;
pub mod report;
pub mod screens;
pub mod search;
pub mod storage;
pub mod validation;

pub use auth::{AuthFlow, AuthState, MpinChange, MpinState};
pub use context::CurrentUser;
pub use error::{LockerError, Result};
pub use gateway::{AuthReply, Gateway, HttpGateway, HttpGatewayConfig};
pub use navigation::{Navigator, Route};
pub use report::{Notice, Presentation, ReportPolicy, Reporter, Severity};
pub use screens::{Confirm, Resource, ResourceKind, ResourceScreen};
pub use search::{Category, Dashboard};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, SessionStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
