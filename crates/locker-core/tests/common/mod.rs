//! Shared fixtures: an in-memory gateway and a wired-up harness.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use locker_core::models::{
    Credential, CredentialDraft, FileDraft, FileEntry, Link, LinkDraft, Note, NoteDraft,
    SearchResults, User,
};
use locker_core::navigation::RecordingNavigator;
use locker_core::report::RecordingReporter;
use locker_core::{
    AuthFlow, AuthReply, CurrentUser, Dashboard, Gateway, LockerError, MemoryStore, Resource,
    ResourceScreen, Result, SessionStore,
};

pub const EMAIL: &str = "a@b.com";
pub const OWNER: &str = "u1";
pub const OTHER: &str = "u2";

/// How the next requests fail, if at all.
#[derive(Debug, Clone)]
pub enum Failure {
    Server(u16, String),
    Network,
}

#[derive(Default)]
pub struct StubState {
    pub calls: Vec<String>,
    pub failure: Option<Failure>,
    /// Calls that fail with a network error regardless of `failure`.
    pub failing_calls: Vec<String>,
    pub auth_reply: Option<AuthReply>,
    pub user: Option<User>,
    pub notes: Vec<Note>,
    pub links: Vec<Link>,
    pub creds: Vec<Credential>,
    pub files: Vec<FileEntry>,
    pub search: SearchResults,
    pub set_mpin_old: Vec<Option<String>>,
    pub created_emails: Vec<String>,
    pub updated_users: Vec<(String, String, String)>,
    pub downloads: Vec<String>,
    next_id: usize,
}

/// Gateway backed by vectors, recording every call by name.
#[derive(Default)]
pub struct StubGateway {
    state: Mutex<StubState>,
}

impl StubGateway {
    pub fn new() -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state();
            state.auth_reply = Some(AuthReply::ok());
            state.user = Some(user(OWNER, false));
        }
        gateway
    }

    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|call| *call == name).count()
    }

    pub fn fail_with(&self, failure: Failure) {
        self.state().failure = Some(failure);
    }

    /// Make only the named call fail from now on.
    pub fn fail_call(&self, name: &str) {
        self.state().failing_calls.push(name.to_string());
    }

    pub fn recover(&self) {
        let mut state = self.state();
        state.failure = None;
        state.failing_calls.clear();
    }

    fn enter(&self, name: &str) -> Result<MutexGuard<'_, StubState>> {
        let mut state = self.state();
        state.calls.push(name.to_string());
        if state.failing_calls.iter().any(|call| call == name) {
            return Err(LockerError::Network("down".to_string()));
        }
        match state.failure.clone() {
            Some(Failure::Server(status, message)) => Err(LockerError::server(Some(status), message)),
            Some(Failure::Network) => Err(LockerError::Network("connection refused".to_string())),
            None => Ok(state),
        }
    }
}

fn next_id(state: &mut StubState, prefix: &str) -> String {
    state.next_id += 1;
    format!("{}-new-{}", prefix, state.next_id)
}

#[async_trait]
impl Gateway for StubGateway {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthReply> {
        let state = self.enter("login")?;
        Ok(state.auth_reply.clone().unwrap_or_default())
    }

    async fn login_with_mpin(&self, _email: &str, _mpin: &str) -> Result<AuthReply> {
        let state = self.enter("login_with_mpin")?;
        Ok(state.auth_reply.clone().unwrap_or_default())
    }

    async fn signup(&self, _fullname: &str, _email: &str, _password: &str) -> Result<()> {
        self.enter("signup").map(|_| ())
    }

    async fn set_mpin(&self, _email: &str, old: Option<&str>, _mpin: &str) -> Result<AuthReply> {
        let mut state = self.enter("set_mpin")?;
        state.set_mpin_old.push(old.map(str::to_string));
        Ok(state.auth_reply.clone().unwrap_or_default())
    }

    async fn find_user(&self, email: &str) -> Result<User> {
        let state = self.enter("find_user")?;
        state
            .user
            .clone()
            .ok_or_else(|| LockerError::NotFound(email.to_string()))
    }

    async fn update_user(&self, old_email: &str, email: &str, fullname: &str) -> Result<()> {
        let mut state = self.enter("update_user")?;
        state
            .updated_users
            .push((old_email.to_string(), email.to_string(), fullname.to_string()));
        Ok(())
    }

    async fn update_password(&self, _email: &str, _old: &str, _new: &str) -> Result<Option<String>> {
        self.enter("update_password").map(|_| ())?;
        Ok(Some("Password changed".to_string()))
    }

    async fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.enter("list_notes")?.notes.clone())
    }

    async fn create_note(&self, draft: &NoteDraft, email: &str) -> Result<()> {
        let mut state = self.enter("create_note")?;
        let id = next_id(&mut state, "n");
        state.created_emails.push(email.to_string());
        state.notes.push(note(&id, OWNER, &draft.title));
        Ok(())
    }

    async fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<()> {
        let mut state = self.enter("update_note")?;
        if let Some(note) = state.notes.iter_mut().find(|n| n.id == id) {
            note.title = draft.title.clone();
            note.note = draft.note.clone();
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let mut state = self.enter("delete_note")?;
        state.notes.retain(|n| n.id != id);
        Ok(())
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        Ok(self.enter("list_links")?.links.clone())
    }

    async fn create_link(&self, draft: &LinkDraft, email: &str) -> Result<()> {
        let mut state = self.enter("create_link")?;
        let id = next_id(&mut state, "l");
        state.created_emails.push(email.to_string());
        state.links.push(link(&id, OWNER, &draft.title));
        Ok(())
    }

    async fn update_link(&self, _id: &str, _draft: &LinkDraft) -> Result<()> {
        self.enter("update_link").map(|_| ())
    }

    async fn delete_link(&self, id: &str) -> Result<()> {
        let mut state = self.enter("delete_link")?;
        state.links.retain(|l| l.id != id);
        Ok(())
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        Ok(self.enter("list_credentials")?.creds.clone())
    }

    async fn create_credential(&self, draft: &CredentialDraft, email: &str) -> Result<()> {
        let mut state = self.enter("create_credential")?;
        let id = next_id(&mut state, "c");
        state.created_emails.push(email.to_string());
        state.creds.push(credential(&id, OWNER, &draft.site));
        Ok(())
    }

    async fn update_credential(&self, _id: &str, _draft: &CredentialDraft) -> Result<()> {
        self.enter("update_credential").map(|_| ())
    }

    async fn delete_credential(&self, id: &str) -> Result<()> {
        let mut state = self.enter("delete_credential")?;
        state.creds.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>> {
        Ok(self.enter("list_files")?.files.clone())
    }

    async fn upload_file(&self, draft: &FileDraft, email: &str) -> Result<()> {
        let mut state = self.enter("upload_file")?;
        let id = next_id(&mut state, "f");
        state.created_emails.push(email.to_string());
        state.files.push(file(&id, OWNER, &draft.title));
        Ok(())
    }

    async fn update_file(&self, _id: &str, _draft: &FileDraft) -> Result<()> {
        self.enter("update_file").map(|_| ())
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        let mut state = self.enter("delete_file")?;
        state.files.retain(|f| f.id != id);
        Ok(())
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let mut state = self.enter("download")?;
        state.downloads.push(url.to_string());
        Ok(b"file-bytes".to_vec())
    }

    async fn search(&self, _query: &str, _user_id: &str) -> Result<SearchResults> {
        Ok(self.enter("search")?.search.clone())
    }
}

pub fn user(id: &str, has_mpin: bool) -> User {
    let mut value = serde_json::json!({ "_id": id, "fullname": "Ada", "email": EMAIL });
    if has_mpin {
        value["mpin"] = serde_json::json!("$2b$10$hash");
    }
    serde_json::from_value(value).unwrap()
}

pub fn note(id: &str, owner: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        note: format!("{} body", title),
        owner_id: Some(owner.to_string()),
        created_at: None,
    }
}

pub fn link(id: &str, owner: &str, title: &str) -> Link {
    Link {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://example.com/{}", id),
        owner_id: Some(owner.to_string()),
        created_at: None,
    }
}

pub fn credential(id: &str, owner: &str, site: &str) -> Credential {
    Credential {
        id: id.to_string(),
        site: site.to_string(),
        username: "octo".to_string(),
        user_email: "octo@b.com".to_string(),
        password: "hunter22".to_string(),
        owner_id: Some(owner.to_string()),
        created_at: None,
    }
}

pub fn file(id: &str, owner: &str, title: &str) -> FileEntry {
    FileEntry {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        file_url: format!("https://cdn.example.com/{}.pdf", id),
        file_path: None,
        owner_id: Some(owner.to_string()),
        created_at: None,
    }
}

/// Everything a flow needs, backed by the stub and an in-memory session.
pub struct Harness {
    pub gateway: Arc<StubGateway>,
    pub session: SessionStore,
    pub current: CurrentUser,
    pub reporter: Arc<RecordingReporter>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new() -> Self {
        let gateway = Arc::new(StubGateway::new());
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        let current = CurrentUser::new(gateway.clone(), session.clone());
        Self {
            gateway,
            session,
            current,
            reporter: Arc::new(RecordingReporter::new()),
            navigator: Arc::new(RecordingNavigator::new()),
        }
    }

    pub fn logged_in() -> Self {
        let harness = Self::new();
        harness.session.persist_login(EMAIL).unwrap();
        harness
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(
            self.gateway.clone(),
            self.current.clone(),
            self.reporter.clone(),
            self.navigator.clone(),
        )
    }

    pub fn screen<R: Resource>(&self) -> ResourceScreen<R> {
        ResourceScreen::new(self.gateway.clone(), self.current.clone(), self.reporter.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            self.gateway.clone(),
            self.current.clone(),
            self.reporter.clone(),
            self.navigator.clone(),
        )
    }
}
