//! Session store over a key-value backend.

use std::sync::Arc;

use super::traits::KeyValueStore;
use super::types::{Session, EMAIL_KEY, IS_LOGGED_IN_KEY};
use crate::error::{LockerError, Result};

/// Reads and writes the two session scalars.
///
/// The auth flow is the only writer; screens and the search dashboard read.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load the current session. Absent keys mean logged out.
    pub fn load(&self) -> Result<Session> {
        let is_logged_in = self
            .backend
            .get(IS_LOGGED_IN_KEY)?
            .map(|value| value == "true")
            .unwrap_or(false);
        let email = self.backend.get(EMAIL_KEY)?;
        Ok(Session {
            is_logged_in,
            email,
        })
    }

    /// Email stored for the session, whether or not the flag is set.
    pub fn email(&self) -> Result<Option<String>> {
        self.backend.get(EMAIL_KEY)
    }

    /// Email of an authenticated session, or a session error.
    pub fn require_email(&self) -> Result<String> {
        self.load()?
            .authenticated_email()
            .map(str::to_string)
            .ok_or_else(|| LockerError::Session("Not logged in".to_string()))
    }

    /// Mark the session logged in for `email`.
    pub fn persist_login(&self, email: &str) -> Result<()> {
        self.backend.set(IS_LOGGED_IN_KEY, "true")?;
        self.backend.set(EMAIL_KEY, email)?;
        tracing::debug!("session persisted");
        Ok(())
    }

    /// Replace the stored email, keeping the logged-in flag.
    pub fn replace_email(&self, email: &str) -> Result<()> {
        self.backend.remove(EMAIL_KEY)?;
        self.backend.set(EMAIL_KEY, email)
    }

    /// Remove both keys.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(IS_LOGGED_IN_KEY)?;
        self.backend.remove(EMAIL_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_fresh_store_is_logged_out() {
        let session = store().load().unwrap();
        assert_eq!(session, Session::default());
        assert!(store().require_email().is_err());
    }

    #[test]
    fn test_persist_then_clear() {
        let store = store();
        store.persist_login("a@b.com").unwrap();
        let session = store.load().unwrap();
        assert!(session.is_logged_in);
        assert_eq!(session.email.as_deref(), Some("a@b.com"));
        assert_eq!(store.require_email().unwrap(), "a@b.com");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::default());
    }

    #[test]
    fn test_flag_must_be_literal_true() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(IS_LOGGED_IN_KEY, "yes").unwrap();
        backend.set(EMAIL_KEY, "a@b.com").unwrap();
        let store = SessionStore::new(backend);
        assert!(!store.load().unwrap().is_logged_in);
    }

    #[test]
    fn test_replace_email_keeps_flag() {
        let store = store();
        store.persist_login("old@b.com").unwrap();
        store.replace_email("new@b.com").unwrap();
        assert_eq!(store.require_email().unwrap(), "new@b.com");
    }
}
