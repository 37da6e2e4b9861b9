//! File downloads.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::write_atomic;
use crate::gateway::Gateway;
use crate::models::FileEntry;

/// Where a download of `file` lands for the requested `dest`.
///
/// A directory destination gets the file name from the URL, or the
/// record id when the URL has none.
pub fn download_target(file: &FileEntry, dest: &Path) -> PathBuf {
    if !dest.is_dir() {
        return dest.to_path_buf();
    }
    let path = file.file_url.split(['?', '#']).next().unwrap_or_default();
    let name = path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| file.id.clone());
    dest.join(name)
}

/// Fetch the bytes behind `file` and write them under `dest`.
pub(super) async fn download(gateway: &dyn Gateway, file: &FileEntry, dest: &Path) -> Result<PathBuf> {
    let target = download_target(file, dest);
    let bytes = gateway.download(&file.file_url).await?;
    write_atomic(&target, &bytes)?;
    tracing::debug!(len = bytes.len(), "file downloaded");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(url: &str) -> FileEntry {
        FileEntry {
            id: "f1".into(),
            title: "Scan".into(),
            description: None,
            file_url: url.into(),
            file_path: None,
            owner_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_download_target_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = download_target(&file("https://cdn.example.com/a/scan.pdf?sig=1"), dir.path());
        assert_eq!(target, dir.path().join("scan.pdf"));

        let target = download_target(&file("https://cdn.example.com/a/"), dir.path());
        assert_eq!(target, dir.path().join("f1"));
    }

    #[test]
    fn test_download_target_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("copy.pdf");
        assert_eq!(download_target(&file("https://cdn.example.com/scan.pdf"), &dest), dest);
    }
}
