//! Local session persistence.
//!
//! - `traits`: the `KeyValueStore` backend interface
//! - `types`: `Session` and the persisted key names
//! - `json_file`: on-disk backend
//! - `memory`: in-process backend
//! - `session`: `SessionStore`, the typed view used by the flows

mod json_file;
mod memory;
mod session;
pub mod traits;
pub mod types;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use session::SessionStore;
pub use traits::KeyValueStore;
pub use types::{Session, EMAIL_KEY, IS_LOGGED_IN_KEY};
