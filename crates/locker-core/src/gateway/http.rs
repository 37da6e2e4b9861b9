//! HTTP implementation of the gateway over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{AuthReply, Gateway};
use crate::error::{LockerError, Result};
use crate::models::{
    Credential, CredentialDraft, FileDraft, FileEntry, Link, LinkDraft, Note, NoteDraft,
    SearchResults, User,
};

/// Backend the mobile client shipped against.
pub const DEFAULT_BASE_URL: &str = "https://backend-1-60y9.onrender.com";

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone)]
pub struct HttpGatewayConfig {
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Gateway issuing one HTTP request per call.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: Option<User>,
}

#[derive(Deserialize)]
struct NoteEnvelope {
    #[serde(default)]
    note: Vec<Note>,
}

#[derive(Deserialize)]
struct LinkEnvelope {
    #[serde(default)]
    link: Vec<Link>,
}

#[derive(Deserialize)]
struct CredentialEnvelope {
    #[serde(default)]
    cred: Vec<Credential>,
}

#[derive(Deserialize)]
struct FileEnvelope {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct MessageReply {
    #[serde(default)]
    message: Option<String>,
}

impl HttpGateway {
    pub fn new(config: HttpGatewayConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LockerError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "request");
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// Non-2xx responses become `LockerError::Server` with the body's
    /// `message` when present.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            LockerError::Network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LockerError::Network(e.to_string()))?;
        if !status.is_success() {
            let message = body_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            tracing::warn!(status = status.as_u16(), "server rejected request");
            return Err(LockerError::server(Some(status.as_u16()), message));
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        decode(&body)
    }

    fn file_form(draft: &FileDraft, email: Option<&str>, always_describe: bool) -> Result<Form> {
        let mut form = Form::new().text("title", draft.title.clone());
        if let Some(email) = email {
            form = form.text("email", email.to_string());
        }
        match draft.description() {
            Some(description) => form = form.text("description", description.to_string()),
            None if always_describe => form = form.text("description", String::new()),
            None => {}
        }
        if let Some(pick) = &draft.file {
            let part = Part::bytes(pick.bytes.clone())
                .file_name(pick.name.clone())
                .mime_str(pick.content_type())
                .map_err(|e| LockerError::InvalidInput(format!("Invalid MIME type: {}", e)))?;
            form = form.part("file", part);
        }
        Ok(form)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| LockerError::Decode(e.to_string()))
}

fn body_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<AuthReply> {
        let request = self
            .request(Method::POST, "/login")
            .json(&json!({ "email": email, "password": password }));
        self.send_json(request).await
    }

    async fn login_with_mpin(&self, email: &str, mpin: &str) -> Result<AuthReply> {
        let request = self
            .request(Method::POST, "/login-mpin")
            .json(&json!({ "email": email, "mpin": mpin }));
        self.send_json(request).await
    }

    async fn signup(&self, fullname: &str, email: &str, password: &str) -> Result<()> {
        let request = self.request(Method::POST, "/signup").json(&json!({
            "fullname": fullname,
            "email": email,
            "password": password,
        }));
        self.send(request).await.map(|_| ())
    }

    async fn set_mpin(&self, email: &str, old: Option<&str>, mpin: &str) -> Result<AuthReply> {
        let request = self
            .request(Method::PUT, "/set-mpin")
            .json(&json!({ "email": email, "old": old, "mpin": mpin }));
        self.send_json(request).await
    }

    async fn find_user(&self, email: &str) -> Result<User> {
        let request = self
            .request(Method::POST, "/findUser")
            .json(&json!({ "email": email }));
        let envelope: UserEnvelope = self.send_json(request).await?;
        envelope
            .user
            .ok_or_else(|| LockerError::NotFound(format!("No account for {}", email)))
    }

    async fn update_user(&self, old_email: &str, email: &str, fullname: &str) -> Result<()> {
        let request = self.request(Method::PUT, "/updateUser").json(&json!({
            "oldEmail": old_email,
            "email": email,
            "fullname": fullname,
        }));
        self.send(request).await.map(|_| ())
    }

    async fn update_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<Option<String>> {
        let request = self.request(Method::PUT, "/updatePassword").json(&json!({
            "email": email,
            "oldPassword": old_password,
            "newPassword": new_password,
        }));
        let body = self.send(request).await?;
        Ok(decode::<MessageReply>(&body).ok().and_then(|reply| reply.message))
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        let envelope: NoteEnvelope = self.send_json(self.request(Method::GET, "/note")).await?;
        Ok(envelope.note)
    }

    async fn create_note(&self, draft: &NoteDraft, email: &str) -> Result<()> {
        let request = self.request(Method::POST, "/note").json(&json!({
            "title": draft.title,
            "note": draft.note,
            "email": email,
        }));
        self.send(request).await.map(|_| ())
    }

    async fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/note/{}", id))
            .json(draft);
        self.send(request).await.map(|_| ())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/note/{}", id));
        self.send(request).await.map(|_| ())
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        let envelope: LinkEnvelope = self.send_json(self.request(Method::GET, "/link")).await?;
        Ok(envelope.link)
    }

    async fn create_link(&self, draft: &LinkDraft, email: &str) -> Result<()> {
        let request = self.request(Method::POST, "/link").json(&json!({
            "title": draft.title,
            "url": draft.url,
            "email": email,
        }));
        self.send(request).await.map(|_| ())
    }

    async fn update_link(&self, id: &str, draft: &LinkDraft) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/link/{}", id))
            .json(draft);
        self.send(request).await.map(|_| ())
    }

    async fn delete_link(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/link/{}", id));
        self.send(request).await.map(|_| ())
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        let envelope: CredentialEnvelope =
            self.send_json(self.request(Method::GET, "/creds")).await?;
        Ok(envelope.cred)
    }

    async fn create_credential(&self, draft: &CredentialDraft, email: &str) -> Result<()> {
        let request = self.request(Method::POST, "/creds").json(&json!({
            "site": draft.site,
            "username": draft.username,
            "userEmail": draft.user_email,
            "password": draft.password,
            "email": email,
        }));
        self.send(request).await.map(|_| ())
    }

    async fn update_credential(&self, id: &str, draft: &CredentialDraft) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/creds/{}", id))
            .json(draft);
        self.send(request).await.map(|_| ())
    }

    async fn delete_credential(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/creds/{}", id));
        self.send(request).await.map(|_| ())
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>> {
        let envelope: FileEnvelope = self.send_json(self.request(Method::GET, "/files")).await?;
        Ok(envelope.files)
    }

    async fn upload_file(&self, draft: &FileDraft, email: &str) -> Result<()> {
        if draft.file.is_none() {
            return Err(LockerError::InvalidInput("No file selected".to_string()));
        }
        let form = Self::file_form(draft, Some(email), false)?;
        let request = self.request(Method::POST, "/files").multipart(form);
        self.send(request).await.map(|_| ())
    }

    async fn update_file(&self, id: &str, draft: &FileDraft) -> Result<()> {
        let form = Self::file_form(draft, None, true)?;
        let request = self
            .request(Method::PUT, &format!("/files/{}", id))
            .multipart(form);
        self.send(request).await.map(|_| ())
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/files/{}", id));
        self.send(request).await.map(|_| ())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("download");
        self.send(self.client.get(url)).await
    }

    async fn search(&self, query: &str, user_id: &str) -> Result<SearchResults> {
        let request = self
            .request(Method::GET, "/search")
            .query(&[("q", query), ("userId", user_id)]);
        self.send_json(request).await
    }
}
