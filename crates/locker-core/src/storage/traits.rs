//! Key-value persistence trait.
//!
//! The session is persisted through a tiny string key-value surface, the
//! same shape a device key-value store offers. Backends take `&self` so one
//! store can be shared behind an `Arc` by every reader.

use crate::error::Result;

/// Key-value persistence interface for session state.
///
/// Implementations must ensure:
/// - `set` followed by `get` returns the written value
/// - `remove` of an absent key succeeds
/// - writes are durable once the call returns
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key.
    fn remove(&self, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn KeyValueStore) {}
    }
}
