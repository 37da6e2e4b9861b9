use async_trait::async_trait;

use super::{DeletePolicy, Resource, ResourceKind};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::models::{Credential, CredentialDraft, FileDraft, FileEntry, Link, LinkDraft, Note, NoteDraft};
use crate::validation::{validate_required, FieldErrors};

#[async_trait]
impl Resource for Note {
    type Draft = NoteDraft;

    const KIND: ResourceKind = ResourceKind::Notes;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::RemoveLocal;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn sensitive(&self) -> Option<&str> {
        Some(&self.note)
    }

    fn share_text(&self) -> String {
        format!("{}\n{}", self.title, self.note)
    }

    fn validate(draft: &NoteDraft) -> std::result::Result<(), FieldErrors> {
        draft.validate()
    }

    async fn list(gateway: &dyn Gateway) -> Result<Vec<Self>> {
        gateway.list_notes().await
    }

    async fn create(gateway: &dyn Gateway, draft: &NoteDraft, email: &str) -> Result<()> {
        gateway.create_note(draft, email).await
    }

    async fn update(gateway: &dyn Gateway, id: &str, draft: &NoteDraft) -> Result<()> {
        gateway.update_note(id, draft).await
    }

    async fn delete(gateway: &dyn Gateway, id: &str) -> Result<()> {
        gateway.delete_note(id).await
    }
}

#[async_trait]
impl Resource for Link {
    type Draft = LinkDraft;

    const KIND: ResourceKind = ResourceKind::Links;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Refetch;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    fn share_text(&self) -> String {
        format!("Check out this link: ({})\n{}", self.title, self.url)
    }

    fn validate(draft: &LinkDraft) -> std::result::Result<(), FieldErrors> {
        draft.validate()
    }

    async fn list(gateway: &dyn Gateway) -> Result<Vec<Self>> {
        gateway.list_links().await
    }

    async fn create(gateway: &dyn Gateway, draft: &LinkDraft, email: &str) -> Result<()> {
        gateway.create_link(draft, email).await
    }

    async fn update(gateway: &dyn Gateway, id: &str, draft: &LinkDraft) -> Result<()> {
        gateway.update_link(id, draft).await
    }

    async fn delete(gateway: &dyn Gateway, id: &str) -> Result<()> {
        gateway.delete_link(id).await
    }
}

#[async_trait]
impl Resource for Credential {
    type Draft = CredentialDraft;

    const KIND: ResourceKind = ResourceKind::Credentials;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::RemoveLocal;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn title(&self) -> &str {
        &self.site
    }

    fn sensitive(&self) -> Option<&str> {
        Some(&self.password)
    }

    fn share_text(&self) -> String {
        format!(
            "App: {}\nUsername: {}\nEmail: {}\nPassword: {}",
            self.site, self.username, self.user_email, self.password
        )
    }

    fn validate(draft: &CredentialDraft) -> std::result::Result<(), FieldErrors> {
        draft.validate()
    }

    async fn list(gateway: &dyn Gateway) -> Result<Vec<Self>> {
        gateway.list_credentials().await
    }

    async fn create(gateway: &dyn Gateway, draft: &CredentialDraft, email: &str) -> Result<()> {
        gateway.create_credential(draft, email).await
    }

    async fn update(gateway: &dyn Gateway, id: &str, draft: &CredentialDraft) -> Result<()> {
        gateway.update_credential(id, draft).await
    }

    async fn delete(gateway: &dyn Gateway, id: &str) -> Result<()> {
        gateway.delete_credential(id).await
    }
}

#[async_trait]
impl Resource for FileEntry {
    type Draft = FileDraft;

    const KIND: ResourceKind = ResourceKind::Files;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Refetch;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn share_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.file_url)
    }

    fn validate(draft: &FileDraft) -> std::result::Result<(), FieldErrors> {
        draft.validate()
    }

    /// Edits keep the existing file unless a replacement is picked.
    fn validate_edit(draft: &FileDraft) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_required(&draft.title, "Please enter a title."));
        errors.into_result()
    }

    async fn list(gateway: &dyn Gateway) -> Result<Vec<Self>> {
        gateway.list_files().await
    }

    async fn create(gateway: &dyn Gateway, draft: &FileDraft, email: &str) -> Result<()> {
        gateway.upload_file(draft, email).await
    }

    async fn update(gateway: &dyn Gateway, id: &str, draft: &FileDraft) -> Result<()> {
        gateway.update_file(id, draft).await
    }

    async fn delete(gateway: &dyn Gateway, id: &str) -> Result<()> {
        gateway.delete_file(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text_formats() {
        let cred = Credential {
            id: "c1".into(),
            site: "GitHub".into(),
            username: "octo".into(),
            user_email: "octo@b.com".into(),
            password: "hunter22".into(),
            owner_id: Some("u1".into()),
            created_at: None,
        };
        assert_eq!(
            cred.share_text(),
            "App: GitHub\nUsername: octo\nEmail: octo@b.com\nPassword: hunter22"
        );

        let link = Link {
            id: "l1".into(),
            title: "Docs".into(),
            url: "https://docs.rs".into(),
            owner_id: None,
            created_at: None,
        };
        assert_eq!(link.share_text(), "Check out this link: (Docs)\nhttps://docs.rs");

        let note = Note {
            id: "n1".into(),
            title: "Groceries".into(),
            note: "eggs".into(),
            owner_id: None,
            created_at: None,
        };
        assert_eq!(note.share_text(), "Groceries\neggs");

        let file = FileEntry {
            id: "f1".into(),
            title: "Scan".into(),
            description: None,
            file_url: "https://cdn.example.com/scan.pdf".into(),
            file_path: None,
            owner_id: None,
            created_at: None,
        };
        assert_eq!(file.share_text(), "Scan\n\nhttps://cdn.example.com/scan.pdf");
    }

    #[test]
    fn test_delete_policies() {
        assert_eq!(Note::DELETE_POLICY, DeletePolicy::RemoveLocal);
        assert_eq!(Credential::DELETE_POLICY, DeletePolicy::RemoveLocal);
        assert_eq!(Link::DELETE_POLICY, DeletePolicy::Refetch);
        assert_eq!(FileEntry::DELETE_POLICY, DeletePolicy::Refetch);
    }

    #[test]
    fn test_file_edit_does_not_require_a_new_pick() {
        let draft = FileDraft::new("Scan", "", None);
        assert!(FileEntry::validate(&draft).is_err());
        assert!(FileEntry::validate_edit(&draft).is_ok());
    }
}
