//! Application-level wiring for the Locker CLI.
//!
//! This module provides:
//! - The per-invocation context that builds the gateway, session and flows
//! - Path and record id resolution
//! - Terminal implementations of the reporter and navigator seams

mod context;
mod resolver;
mod terminal;

// Re-export public API
pub use context::AppContext;
pub use resolver::{command_name, resolve_record_id};
