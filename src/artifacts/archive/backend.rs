//! Versioned filesystem contract
//!
//! The editor never touches storage directly. Everything it needs from the
//! archive (opening it, checking out versions, file operations, the change
//! feed and the local-sync diff/publish/revert calls) goes through the
//! [`ArchiveService`] and [`Archive`] traits defined here. `areas` ships an
//! in-memory and an on-disk implementation.

use crate::artifacts::checkout::checkout::CheckoutMode;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::diff::diff_entry::DiffEntry;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Per-archive settings the owner controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Local edits are staged in a preview checkout instead of going
    /// straight to latest.
    pub preview_mode: bool,
    /// The archive has been saved to the user's library.
    pub is_saved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub title: Option<String>,
    pub user_settings: UserSettings,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_container: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Compare content hashes instead of sizes.
    pub compare_content: bool,
    /// Report a directory present on one side only once, without its contents.
    pub shallow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub shallow: bool,
    /// Paths to publish or revert; directories carry a trailing `/`.
    pub paths: Vec<String>,
}

/// Something changed in the archive at or below `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: String,
}

/// Push-based feed of [`ChangeEvent`]s. Runs until every sender is gone.
#[derive(Debug)]
pub struct ChangeStream {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl ChangeStream {
    pub fn new(receiver: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next change. Missed events collapse into a single
    /// change of the whole archive; `None` once the archive is gone.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "change stream lagged");
                Some(ChangeEvent {
                    path: crate::artifacts::core::path::ROOT.to_string(),
                })
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}

/// Opens archives by URL.
#[allow(async_fn_in_trait)]
pub trait ArchiveService {
    type Archive: Archive;

    /// Opens the archive at `base_url` (no version qualifier) at its latest
    /// checkout.
    async fn open(&self, base_url: &str) -> Result<Self::Archive, EditorError>;
}

/// A handle on one checkout of an archive.
///
/// Paths are absolute and `/`-separated. Diff, publish and revert always
/// compare the archive's preview checkout with its latest checkout,
/// whichever checkout the handle itself points at.
#[allow(async_fn_in_trait)]
pub trait Archive: Clone {
    fn url(&self) -> String;

    fn mode(&self) -> &CheckoutMode;

    /// Another checkout of the same archive.
    fn checkout(&self, mode: &CheckoutMode) -> Self;

    async fn info(&self) -> Result<ArchiveInfo, EditorError>;

    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, EditorError>;

    async fn read_file(&self, path: &str) -> Result<Bytes, EditorError>;

    async fn read_text(&self, path: &str) -> Result<String, EditorError> {
        let content = self.read_file(path).await?;
        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    async fn write_file(&self, path: &str, content: Bytes) -> Result<(), EditorError>;

    async fn mkdir(&self, path: &str) -> Result<(), EditorError>;

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), EditorError>;

    async fn unlink(&self, path: &str) -> Result<(), EditorError>;

    async fn rmdir(&self, path: &str, recursive: bool) -> Result<(), EditorError>;

    fn watch(&self) -> ChangeStream;

    async fn diff_local_sync(&self, options: DiffOptions) -> Result<Vec<DiffEntry>, EditorError>;

    async fn publish_local_sync(&self, options: SyncOptions) -> Result<(), EditorError>;

    async fn revert_local_sync(&self, options: SyncOptions) -> Result<(), EditorError>;
}
