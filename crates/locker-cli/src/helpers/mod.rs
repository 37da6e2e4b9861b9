//! Input helpers for the CLI.
//!
//! Values come from flags first, then prompts. With `--no-input` (or no
//! TTY) a missing value is left empty so form validation can name it.

mod input;

// Re-export public API
pub use input::{confirm_delete, edited_text, mpin, secret, secret_pair, text};
