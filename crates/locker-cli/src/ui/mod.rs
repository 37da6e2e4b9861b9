//! UI primitives for the Locker CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, styles, symbols
//! - **Render**: Tables, headers, receipts, hints, notices
//! - **Progress**: Spinner shown while waiting on the backend
//! - **Format**: String utilities (truncate, wrap, timestamps)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, Badge};
//! use crate::ui::render::{header, simple_table, hint};
//!
//! let ctx = UiContext::from_env(cli.json, cli.format.as_deref(), cli.no_color, cli.ascii);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "notes list", None));
//! println!("{}", simple_table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "locker notes show <ID>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, divider, header, header_with_context, hint, kv, notice_line, print,
    print_error, receipt, simple_table, table, Column,
};

pub use progress::with_spinner;

pub use format::{format_created, single_line, truncate, wrap};
