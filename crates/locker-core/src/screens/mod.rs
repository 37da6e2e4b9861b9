//! Resource screens.
//!
//! Notes, links, credentials and files share one screen shape. The
//! differences between kinds (endpoints, required fields, delete behavior,
//! share text) live in the [`Resource`] impls in `resources`.

mod files;
mod resources;
mod screen;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::gateway::Gateway;
use crate::navigation::Route;
use crate::validation::FieldErrors;

pub use files::download_target;
pub use screen::{Confirm, ResourceScreen, MASK};

/// The four record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Notes,
    Links,
    Credentials,
    Files,
}

impl ResourceKind {
    /// Singular noun for messages.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "Note",
            ResourceKind::Links => "Link",
            ResourceKind::Credentials => "Credentials",
            ResourceKind::Files => "File",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ResourceKind::Notes => Route::Notes,
            ResourceKind::Links => Route::Links,
            ResourceKind::Credentials => Route::Credentials,
            ResourceKind::Files => Route::Files,
        }
    }

    /// Message shown when the list cannot be loaded.
    pub fn load_error(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "Failed to fetch notes",
            ResourceKind::Links => "Failed to load links",
            ResourceKind::Credentials => "Error fetching credentials",
            ResourceKind::Files => "Failed to fetch Files",
        }
    }

    /// Message shown after a successful create.
    pub fn created(&self) -> &'static str {
        match self {
            ResourceKind::Notes => "Note saved successfully!",
            ResourceKind::Links => "Link saved successfully!",
            ResourceKind::Credentials => "Credentials saved successfully!",
            ResourceKind::Files => "File uploaded successfully!",
        }
    }
}

/// What happens to the local list after a delete succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Drop the id from the list in place.
    RemoveLocal,
    /// Fetch the whole list again.
    Refetch,
}

/// A record kind that can be listed, created, edited and deleted.
#[async_trait]
pub trait Resource: Clone + Send + Sync + Sized + 'static {
    /// Form state for create and edit.
    type Draft: Clone + Send + Sync + for<'a> From<&'a Self>;

    const KIND: ResourceKind;
    const DELETE_POLICY: DeletePolicy;

    fn id(&self) -> &str;

    fn owner_id(&self) -> Option<&str>;

    /// Heading shown for the record in lists.
    fn title(&self) -> &str;

    /// Field masked until revealed, if the kind has one.
    fn sensitive(&self) -> Option<&str> {
        None
    }

    /// Plain-text summary handed to the share sheet.
    fn share_text(&self) -> String;

    /// Validation for a new record.
    fn validate(draft: &Self::Draft) -> std::result::Result<(), FieldErrors>;

    /// Validation for an edit. Defaults to the create rules.
    fn validate_edit(draft: &Self::Draft) -> std::result::Result<(), FieldErrors> {
        Self::validate(draft)
    }

    /// Unfiltered list from the backend.
    async fn list(gateway: &dyn Gateway) -> Result<Vec<Self>>;

    async fn create(gateway: &dyn Gateway, draft: &Self::Draft, email: &str) -> Result<()>;

    async fn update(gateway: &dyn Gateway, id: &str, draft: &Self::Draft) -> Result<()>;

    async fn delete(gateway: &dyn Gateway, id: &str) -> Result<()>;
}

/// Keep only records owned by `owner_id`.
///
/// Convenience filtering for display. It does not protect anything: the
/// backend returns every owner's records and must enforce access itself.
pub fn owned_by<R: Resource>(records: Vec<R>, owner_id: &str) -> Vec<R> {
    records
        .into_iter()
        .filter(|record| record.owner_id() == Some(owner_id))
        .collect()
}
