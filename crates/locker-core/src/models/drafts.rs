//! Form state for creating and editing records.
//!
//! A draft is what an upload or edit form holds before submission. Each
//! draft validates its required fields; a failing draft is never sent.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LockerError, Result};
use crate::validation::{validate_required, FieldErrors};

use super::records::{Credential, FileEntry, Link, Note};

/// Fallback MIME type for picked files.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub note: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: note.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_required(&self.title, "Title is required."));
        if errors.is_empty() {
            errors.check("note", validate_required(&self.note, "Note cannot be empty."));
        }
        errors.into_result()
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self::new(note.title.clone(), note.note.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.is_empty() || self.url.is_empty() {
            errors.insert("form", "Both Title and URL fields are required.");
        }
        errors.into_result()
    }
}

impl From<&Link> for LinkDraft {
    fn from(link: &Link) -> Self {
        Self::new(link.title.clone(), link.url.clone())
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct CredentialDraft {
    pub site: String,
    pub username: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDraft")
            .field("site", &self.site)
            .field("username", &self.username)
            .field("user_email", &self.user_email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CredentialDraft {
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        user_email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            username: username.into(),
            user_email: user_email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let any_missing = [&self.site, &self.username, &self.user_email, &self.password]
            .iter()
            .any(|value| value.is_empty());
        if any_missing {
            errors.insert("form", "All fields are required.");
        }
        errors.into_result()
    }
}

impl From<&Credential> for CredentialDraft {
    fn from(cred: &Credential) -> Self {
        Self::new(
            cred.site.clone(),
            cred.username.clone(),
            cred.user_email.clone(),
            cred.password.clone(),
        )
    }
}

/// A local file chosen for upload, held in memory until sent.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePick {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePick")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FilePick {
    /// Read a file from disk into a pick buffer.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            LockerError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| LockerError::InvalidInput(format!("Not a file: {}", path.display())))?;
        Ok(Self {
            path: path.to_path_buf(),
            mime_type: guess_mime_type(&name).map(str::to_string),
            name,
            bytes,
        })
    }

    /// MIME type to send, falling back to `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }
}

/// Best-effort MIME type from a file name's extension.
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => return None,
    };
    Some(mime)
}

/// Upload or edit form for a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDraft {
    pub title: String,
    pub description: String,
    /// Required on upload, optional replacement on edit.
    pub file: Option<FilePick>,
}

impl FileDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, file: Option<FilePick>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            file,
        }
    }

    /// Upload validation: a file must be picked and the title non-blank.
    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.file.is_none() {
            errors.insert("file", "Please select a file first.");
        } else {
            errors.check("title", validate_required(&self.title, "Please enter a title."));
        }
        errors.into_result()
    }

    /// Trimmed description, or `None` when blank.
    pub fn description(&self) -> Option<&str> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl From<&FileEntry> for FileDraft {
    fn from(file: &FileEntry) -> Self {
        Self::new(
            file.title.clone(),
            file.description.clone().unwrap_or_default(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_draft_reports_first_missing_field() {
        let errors = NoteDraft::new("  ", "").validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required."));
        assert_eq!(errors.len(), 1);

        let errors = NoteDraft::new("t", "   ").validate().unwrap_err();
        assert_eq!(errors.get("note"), Some("Note cannot be empty."));

        assert!(NoteDraft::new("t", "b").validate().is_ok());
    }

    #[test]
    fn test_link_and_credential_drafts() {
        assert!(LinkDraft::new("", "https://x.io").validate().is_err());
        assert!(LinkDraft::new("x", "https://x.io").validate().is_ok());

        let errors = CredentialDraft::new("gh", "", "a@b.com", "pw").validate().unwrap_err();
        assert_eq!(errors.get("form"), Some("All fields are required."));
        assert!(CredentialDraft::new("gh", "me", "a@b.com", "pw").validate().is_ok());
    }

    #[test]
    fn test_file_draft_requires_pick_then_title() {
        let errors = FileDraft::new("", "", None).validate().unwrap_err();
        assert_eq!(errors.get("file"), Some("Please select a file first."));

        let pick = FilePick {
            path: PathBuf::from("a.pdf"),
            name: "a.pdf".into(),
            mime_type: None,
            bytes: vec![1, 2, 3],
        };
        let errors = FileDraft::new(" ", "", Some(pick.clone())).validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Please enter a title."));

        let draft = FileDraft::new("Report", "  ", Some(pick));
        assert!(draft.validate().is_ok());
        assert_eq!(draft.description(), None);
        assert_eq!(draft.file.as_ref().unwrap().content_type(), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_file_pick_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let pick = FilePick::from_path(&path).unwrap();
        assert_eq!(pick.name, "scan.PDF");
        assert_eq!(pick.content_type(), "application/pdf");
        assert_eq!(pick.bytes, b"%PDF-1.4");

        assert!(FilePick::from_path(&dir.path().join("missing.txt")).is_err());
    }
}
