//! Data model shared by the gateway and the screens.

mod drafts;
mod records;
mod timestamp;

pub use drafts::{
    guess_mime_type, CredentialDraft, FileDraft, FilePick, LinkDraft, NoteDraft,
    DEFAULT_MIME_TYPE,
};
pub use records::{Credential, FileEntry, FileKind, Link, Note, SearchResults, User};
