//! Remote gateway.
//!
//! The `Gateway` trait is the seam between the flows and the backend. Every
//! method is a single request: no retry, no backoff, no auth header. The
//! HTTP implementation lives in `http`; tests supply their own.

mod http;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{
    Credential, CredentialDraft, FileDraft, FileEntry, Link, LinkDraft, Note, NoteDraft,
    SearchResults, User,
};

pub use http::{HttpGateway, HttpGatewayConfig, DEFAULT_BASE_URL};

/// Reply shape of the auth endpoints: `{ success, message? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

impl AuthReply {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Backend operations consumed by the client.
#[async_trait]
pub trait Gateway: Send + Sync {
    // --- Account ---

    /// `POST /login`
    async fn login(&self, email: &str, password: &str) -> Result<AuthReply>;

    /// `POST /login-mpin`
    async fn login_with_mpin(&self, email: &str, mpin: &str) -> Result<AuthReply>;

    /// `POST /signup`. Any 2xx is success.
    async fn signup(&self, fullname: &str, email: &str, password: &str) -> Result<()>;

    /// `PUT /set-mpin`. `old` is sent as `null` when absent.
    async fn set_mpin(&self, email: &str, old: Option<&str>, mpin: &str) -> Result<AuthReply>;

    /// `POST /findUser`
    async fn find_user(&self, email: &str) -> Result<User>;

    /// `PUT /updateUser`
    async fn update_user(&self, old_email: &str, email: &str, fullname: &str) -> Result<()>;

    /// `PUT /updatePassword`. Returns the server's message, if any.
    async fn update_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<Option<String>>;

    // --- Notes ---

    /// `GET /note`, unfiltered by owner.
    async fn list_notes(&self) -> Result<Vec<Note>>;
    async fn create_note(&self, draft: &NoteDraft, email: &str) -> Result<()>;
    async fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<()>;
    async fn delete_note(&self, id: &str) -> Result<()>;

    // --- Links ---

    /// `GET /link`, unfiltered by owner.
    async fn list_links(&self) -> Result<Vec<Link>>;
    async fn create_link(&self, draft: &LinkDraft, email: &str) -> Result<()>;
    async fn update_link(&self, id: &str, draft: &LinkDraft) -> Result<()>;
    async fn delete_link(&self, id: &str) -> Result<()>;

    // --- Credentials ---

    /// `GET /creds`, unfiltered by owner.
    async fn list_credentials(&self) -> Result<Vec<Credential>>;
    async fn create_credential(&self, draft: &CredentialDraft, email: &str) -> Result<()>;
    async fn update_credential(&self, id: &str, draft: &CredentialDraft) -> Result<()>;
    async fn delete_credential(&self, id: &str) -> Result<()>;

    // --- Files ---

    /// `GET /files`, unfiltered by owner.
    async fn list_files(&self) -> Result<Vec<FileEntry>>;
    /// Multipart upload. The draft must carry a picked file.
    async fn upload_file(&self, draft: &FileDraft, email: &str) -> Result<()>;
    /// Multipart update; the file part is only sent when a replacement was picked.
    async fn update_file(&self, id: &str, draft: &FileDraft) -> Result<()>;
    async fn delete_file(&self, id: &str) -> Result<()>;
    /// Fetch the raw bytes behind a file URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    // --- Search ---

    /// `GET /search?q=..&userId=..`
    async fn search(&self, query: &str, user_id: &str) -> Result<SearchResults>;
}
