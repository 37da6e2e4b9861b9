use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{owned_by, DeletePolicy, Resource};
use crate::context::CurrentUser;
use crate::error::{LockerError, Result};
use crate::gateway::Gateway;
use crate::models::FileEntry;
use crate::report::{Notice, Reporter};
use crate::validation::FieldErrors;

/// Placeholder shown for a masked field.
pub const MASK: &str = "••••••••";

/// Answer to a destructive-action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Accepted,
    Declined,
}

impl From<bool> for Confirm {
    fn from(accepted: bool) -> Self {
        if accepted {
            Confirm::Accepted
        } else {
            Confirm::Declined
        }
    }
}

/// List screen state for one record kind.
pub struct ResourceScreen<R: Resource> {
    gateway: Arc<dyn Gateway>,
    current: CurrentUser,
    reporter: Arc<dyn Reporter>,
    items: Vec<R>,
    loading: bool,
    editing: Option<(String, R::Draft)>,
    revealed: HashSet<String>,
    errors: FieldErrors,
}

impl<R: Resource> ResourceScreen<R> {
    pub fn new(gateway: Arc<dyn Gateway>, current: CurrentUser, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            gateway,
            current,
            reporter,
            items: Vec::new(),
            loading: false,
            editing: None,
            revealed: HashSet::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Field errors left by the last create or save.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn require(&self, id: &str) -> Result<&R> {
        self.find(id)
            .ok_or_else(|| LockerError::NotFound(format!("{} {}", R::KIND.noun(), id)))
    }

    /// Fetch the list and keep the current owner's records.
    ///
    /// Any failure clears the list.
    pub async fn load(&mut self) -> Result<()> {
        self.loading = true;
        let outcome = self.fetch_owned().await;
        self.loading = false;

        match outcome {
            Ok(items) => {
                tracing::debug!(kind = ?R::KIND, count = items.len(), "loaded");
                self.items = items;
                if self.items.is_empty() && R::KIND == super::ResourceKind::Notes {
                    self.reporter.report(Notice::info("No notes found"));
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(kind = ?R::KIND, error = %e, "load failed");
                self.items.clear();
                self.revealed.clear();
                self.reporter.report(Notice::error(R::KIND.load_error()));
                Err(e)
            }
        }
    }

    async fn fetch_owned(&self) -> Result<Vec<R>> {
        let owner_id = self.current.owner_id().await?;
        let records = R::list(self.gateway.as_ref()).await?;
        Ok(owned_by(records, &owner_id))
    }

    /// Validate and submit a new record under the session's email.
    ///
    /// An invalid draft makes no request.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<()> {
        self.errors = FieldErrors::new();
        if let Err(errors) = R::validate(draft) {
            return Err(self.reject(errors));
        }

        let email = self.current.email()?;
        match R::create(self.gateway.as_ref(), draft, &email).await {
            Ok(()) => {
                self.reporter.report(Notice::success(R::KIND.created()));
                Ok(())
            }
            Err(e) => {
                let fallback = format!("Failed to save {}", R::KIND.noun().to_lowercase());
                self.reporter
                    .report(Notice::error(e.server_message().unwrap_or(fallback.as_str())));
                Err(e)
            }
        }
    }

    /// Open the inline editor for `id`, pre-filled from the record.
    pub fn begin_edit(&mut self, id: &str) -> Result<&mut R::Draft> {
        let draft = R::Draft::from(self.require(id)?);
        self.errors = FieldErrors::new();
        let (_, draft) = self.editing.insert((id.to_string(), draft));
        Ok(draft)
    }

    pub fn editing(&self) -> Option<(&str, &R::Draft)> {
        self.editing.as_ref().map(|(id, draft)| (id.as_str(), draft))
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        self.editing.as_mut().map(|(_, draft)| draft)
    }

    /// Close the editor without sending anything.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.errors = FieldErrors::new();
    }

    /// Send the edited record and reload the list.
    ///
    /// On failure the editor stays open with the draft intact.
    pub async fn save_edit(&mut self) -> Result<()> {
        let Some((id, draft)) = self.editing.take() else {
            return Err(LockerError::InvalidInput("Nothing is being edited".to_string()));
        };
        self.errors = FieldErrors::new();
        if let Err(errors) = R::validate_edit(&draft) {
            self.editing = Some((id, draft));
            return Err(self.reject(errors));
        }

        if let Err(e) = R::update(self.gateway.as_ref(), &id, &draft).await {
            let fallback = format!("Failed to update {}", R::KIND.noun().to_lowercase());
            self.reporter
                .report(Notice::error(e.server_message().unwrap_or(fallback.as_str())));
            self.editing = Some((id, draft));
            return Err(e);
        }

        self.reporter
            .report(Notice::success(format!("{} updated", R::KIND.noun())));
        self.refresh().await;
        Ok(())
    }

    /// Reload after a mutation the backend already accepted.
    ///
    /// A failed reload is reported by `load` and clears the list; it does
    /// not undo the mutation's result.
    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            tracing::debug!(kind = ?R::KIND, error = %e, "refresh after change failed");
        }
    }

    /// Delete a record once the user has confirmed.
    ///
    /// Returns whether anything was deleted.
    pub async fn delete(&mut self, id: &str, confirm: Confirm) -> Result<bool> {
        if confirm == Confirm::Declined {
            return Ok(false);
        }

        if let Err(e) = R::delete(self.gateway.as_ref(), id).await {
            let fallback = format!("Failed to delete {}", R::KIND.noun().to_lowercase());
            self.reporter
                .report(Notice::error(e.server_message().unwrap_or(fallback.as_str())));
            return Err(e);
        }

        self.revealed.remove(id);
        if matches!(&self.editing, Some((editing, _)) if editing == id) {
            self.editing = None;
        }
        self.reporter
            .report(Notice::success(format!("{} deleted", R::KIND.noun())));
        match R::DELETE_POLICY {
            DeletePolicy::RemoveLocal => {
                self.items.retain(|item| item.id() != id);
            }
            DeletePolicy::Refetch => self.refresh().await,
        }
        Ok(true)
    }

    /// Flip the masked state of a record's sensitive field.
    ///
    /// Returns whether the field is now shown.
    pub fn toggle_reveal(&mut self, id: &str) -> bool {
        if self.revealed.remove(id) {
            false
        } else {
            self.revealed.insert(id.to_string());
            true
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// The sensitive field as it should be displayed.
    pub fn display_sensitive<'a>(&self, item: &'a R) -> Option<&'a str> {
        let value = item.sensitive()?;
        if self.is_revealed(item.id()) {
            Some(value)
        } else {
            Some(MASK)
        }
    }

    pub fn share_text(&self, id: &str) -> Result<String> {
        Ok(self.require(id)?.share_text())
    }

    fn reject(&mut self, errors: FieldErrors) -> LockerError {
        for notice in Notice::from_field_errors(&errors) {
            self.reporter.report(notice);
        }
        self.errors = errors.clone();
        LockerError::Validation(errors)
    }
}

impl ResourceScreen<FileEntry> {
    /// Download a listed file to `dest`, a file path or a directory.
    pub async fn download(&self, id: &str, dest: &Path) -> Result<PathBuf> {
        let file = self.require(id)?;
        match super::files::download(self.gateway.as_ref(), file, dest).await {
            Ok(path) => {
                self.reporter
                    .report(Notice::success(format!("Saved to {}", path.display())));
                Ok(path)
            }
            Err(e) => {
                self.reporter.report(Notice::error("Failed to download file"));
                Err(e)
            }
        }
    }
}
