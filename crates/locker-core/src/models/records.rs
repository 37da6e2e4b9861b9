//! Records as returned by the backend.
//!
//! Field names follow the wire format (`_id`, `userId`, `createdAt`, ...).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record returned by `POST /findUser`.
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub fullname: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Raw MPIN field; only its presence matters to the client.
    #[serde(default, skip_serializing)]
    pub mpin: Option<serde_json::Value>,
}

impl User {
    /// Whether an MPIN is already set for this account.
    pub fn has_mpin(&self) -> bool {
        match &self.mpin {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Some(_) => true,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("has_mpin", &self.has_mpin())
            .finish()
    }
}

/// A stored login for some site.
///
/// The password travels and rests in plain text on the backend. That is a
/// known defect of the service, not a property to rely on.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub site: String,

    #[serde(default)]
    pub username: String,

    #[serde(rename = "userEmail", default)]
    pub user_email: String,

    #[serde(default)]
    pub password: String,

    #[serde(rename = "userId", default)]
    pub owner_id: Option<String>,

    #[serde(rename = "createdAt", default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("user_email", &self.user_email)
            .field("password", &"<redacted>")
            .field("owner_id", &self.owner_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A bookmarked URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub url: String,

    #[serde(rename = "userId", default)]
    pub owner_id: Option<String>,

    #[serde(rename = "createdAt", default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A free-text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// Note body. Search results have been seen to carry it as `content`.
    #[serde(default, alias = "content")]
    pub note: String,

    #[serde(rename = "userId", default)]
    pub owner_id: Option<String>,

    #[serde(rename = "createdAt", default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An uploaded file. The bytes live remotely behind `file_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "fileUrl", default)]
    pub file_url: String,

    #[serde(rename = "filePath", default)]
    pub file_path: Option<String>,

    #[serde(rename = "userId", default)]
    pub owner_id: Option<String>,

    #[serde(rename = "createdAt", default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Broad file type inferred from the URL's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Video,
    Pdf,
    Document,
    Other,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Pdf => "PDF File",
            FileKind::Document => "Document File",
            FileKind::Other => "File",
        }
    }
}

impl FileEntry {
    /// Classify by the extension of the URL path, ignoring any query string.
    pub fn kind(&self) -> FileKind {
        let path = self.file_url.split('?').next().unwrap_or_default();
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => FileKind::Image,
            "mp4" | "mov" | "avi" => FileKind::Video,
            "pdf" => FileKind::Pdf,
            "doc" | "docx" | "ppt" | "pptx" | "xls" | "xlsx" | "txt" => FileKind::Document,
            _ => FileKind::Other,
        }
    }
}

/// Grouped results of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(default)]
    pub docs: Vec<FileEntry>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub creds: Vec<Credential>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.docs.is_empty() && self.links.is_empty() && self.creds.is_empty()
    }

    pub fn total(&self) -> usize {
        self.notes.len() + self.docs.len() + self.links.len() + self.creds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_decodes_wire_names() {
        let cred: Credential = serde_json::from_value(json!({
            "_id": "c1",
            "site": "github",
            "username": "octo",
            "userEmail": "octo@b.com",
            "password": "hunter22",
            "userId": "u1",
            "createdAt": 1704164645000i64
        }))
        .unwrap();
        assert_eq!(cred.id, "c1");
        assert_eq!(cred.user_email, "octo@b.com");
        assert_eq!(cred.owner_id.as_deref(), Some("u1"));
        assert!(cred.created_at.is_some());
        assert!(!format!("{:?}", cred).contains("hunter22"));
    }

    #[test]
    fn test_note_accepts_content_alias() {
        let note: Note = serde_json::from_value(json!({
            "_id": "n1",
            "title": "t",
            "content": "body"
        }))
        .unwrap();
        assert_eq!(note.note, "body");
        assert_eq!(note.owner_id, None);
    }

    #[test]
    fn test_user_has_mpin() {
        let user: User = serde_json::from_value(json!({"_id": "u1", "fullname": "A"})).unwrap();
        assert!(!user.has_mpin());
        let user: User =
            serde_json::from_value(json!({"_id": "u1", "fullname": "A", "mpin": ""})).unwrap();
        assert!(!user.has_mpin());
        let user: User =
            serde_json::from_value(json!({"_id": "u1", "fullname": "A", "mpin": "$2b$10$hash"}))
                .unwrap();
        assert!(user.has_mpin());
    }

    #[test]
    fn test_file_kind_ignores_query() {
        let mut file = FileEntry {
            id: "f1".into(),
            title: "t".into(),
            description: None,
            file_url: "https://cdn.example.com/a/photo.JPG?sig=abc.pdf".into(),
            file_path: None,
            owner_id: None,
            created_at: None,
        };
        assert_eq!(file.kind(), FileKind::Image);
        file.file_url = "https://cdn.example.com/report.pdf".into();
        assert_eq!(file.kind(), FileKind::Pdf);
        file.file_url = "https://cdn.example.com/notes.docx".into();
        assert_eq!(file.kind(), FileKind::Document);
        file.file_url = "https://cdn.example.com/blob".into();
        assert_eq!(file.kind(), FileKind::Other);
    }

    #[test]
    fn test_search_results_tolerate_missing_groups() {
        let results: SearchResults = serde_json::from_value(json!({
            "notes": [{"_id": "n1", "title": "a", "note": "b", "userId": "u1"}]
        }))
        .unwrap();
        assert_eq!(results.total(), 1);
        assert!(results.docs.is_empty());
    }
}
