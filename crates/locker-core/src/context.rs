//! Current-user context.
//!
//! The owner record is resolved with one `findUser` per session and shared by
//! every screen holding a clone of [`CurrentUser`].

use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;

use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::User;
use crate::storage::SessionStore;

type Slot = Option<(String, Arc<OnceCell<User>>)>;

/// Lazily resolved account of the logged-in session.
#[derive(Clone)]
pub struct CurrentUser {
    gateway: Arc<dyn Gateway>,
    session: SessionStore,
    slot: Arc<Mutex<Slot>>,
}

impl CurrentUser {
    pub fn new(gateway: Arc<dyn Gateway>, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Email of the authenticated session.
    pub fn email(&self) -> Result<String> {
        self.session.require_email()
    }

    /// The account record, fetched on first use.
    ///
    /// The cache is keyed by the session email; a changed email resolves
    /// again.
    pub async fn user(&self) -> Result<User> {
        let email = self.email()?;
        let cell = self.cell_for(&email);
        let user = cell
            .get_or_try_init(|| async {
                tracing::debug!("resolving current user");
                self.gateway.find_user(&email).await
            })
            .await?;
        Ok(user.clone())
    }

    /// Owner id used to filter listed records.
    pub async fn owner_id(&self) -> Result<String> {
        Ok(self.user().await?.id)
    }

    /// Drop the cached record.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    fn cell_for(&self, email: &str) -> Arc<OnceCell<User>> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match slot.as_ref() {
            Some((cached, cell)) if cached == email => cell.clone(),
            _ => {
                let cell = Arc::new(OnceCell::new());
                *slot = Some((email.to_string(), cell.clone()));
                cell
            }
        }
    }
}
