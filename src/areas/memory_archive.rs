//! In-process versioned archive
//!
//! Keeps every published version as a [`Manifest`] plus a shared object map,
//! and the preview (local-sync) checkout as one more manifest. Handles are
//! cheap clones sharing one store, so a checkout of latest sees a publish
//! made through a preview handle immediately.

use crate::artifacts::archive::backend::{
    Archive, ArchiveInfo, ArchiveService, ChangeEvent, ChangeStream, DiffOptions, DirEntry,
    SyncOptions, UserSettings,
};
use crate::artifacts::archive::manifest::{Manifest, ManifestEntry};
use crate::artifacts::checkout::checkout::CheckoutMode;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::DiffEntry;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Publish,
    Revert,
}

/// A publish or revert request as the archive received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCall {
    pub kind: SyncKind,
    pub paths: Vec<String>,
}

#[derive(Debug)]
struct Store {
    info: ArchiveInfo,
    objects: HashMap<ObjectId, Bytes>,
    /// `versions[0]` is the empty archive.
    versions: Vec<Manifest>,
    preview: Manifest,
    sync_calls: Vec<SyncCall>,
    rejected_sync: Option<String>,
    failed_listing: Option<String>,
}

impl Store {
    fn new(title: Option<String>) -> Self {
        Self {
            info: ArchiveInfo {
                title,
                user_settings: UserSettings::default(),
            },
            objects: HashMap::new(),
            versions: vec![Manifest::new()],
            preview: Manifest::new(),
            sync_calls: Vec::new(),
            rejected_sync: None,
            failed_listing: None,
        }
    }

    fn latest(&self) -> &Manifest {
        &self.versions[self.versions.len() - 1]
    }
}

#[derive(Debug, Clone)]
pub struct MemoryArchive {
    base_url: String,
    mode: CheckoutMode,
    store: Arc<Mutex<Store>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl MemoryArchive {
    pub fn new(base_url: impl Into<String>, title: Option<&str>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            base_url: base_url.into(),
            mode: CheckoutMode::Latest,
            store: Arc::new(Mutex::new(Store::new(title.map(str::to_string)))),
            events,
        }
    }

    /// Changes the owner's settings. Turning preview mode on starts the
    /// preview over from latest.
    pub async fn set_user_settings(&self, settings: UserSettings) {
        let mut store = self.store.lock().await;
        if settings.preview_mode && !store.info.user_settings.preview_mode {
            store.preview = store.latest().clone();
        }
        store.info.user_settings = settings;
        drop(store);

        self.emit(path::ROOT);
    }

    pub async fn version_count(&self) -> usize {
        self.store.lock().await.versions.len()
    }

    /// Every publish/revert request received so far, oldest first.
    pub async fn sync_calls(&self) -> Vec<SyncCall> {
        self.store.lock().await.sync_calls.clone()
    }

    /// Makes the next publish or revert fail with a conflict, leaving the
    /// archive untouched.
    pub async fn reject_next_sync(&self, message: impl Into<String>) {
        self.store.lock().await.rejected_sync = Some(message.into());
    }

    /// Makes the next directory listing fail with an I/O error.
    pub async fn fail_next_listing(&self, message: impl Into<String>) {
        self.store.lock().await.failed_listing = Some(message.into());
    }

    fn emit(&self, changed: &str) {
        // nobody watching is fine
        let _ = self.events.send(ChangeEvent {
            path: changed.to_string(),
        });
    }

    fn read_manifest<'a>(&self, store: &'a Store) -> Result<&'a Manifest, EditorError> {
        match &self.mode {
            CheckoutMode::Latest => Ok(store.latest()),
            CheckoutMode::Preview => Ok(&store.preview),
            CheckoutMode::Historical(version) => usize::try_from(*version)
                .ok()
                .and_then(|version| store.versions.get(version))
                .ok_or_else(|| EditorError::not_found(self.url())),
            CheckoutMode::Named(_) => Err(EditorError::not_found(self.url())),
        }
    }

    /// Applies `change` to a copy of this checkout's manifest and installs
    /// the copy only if the change succeeded.
    async fn mutate<F>(&self, changed: &str, change: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut Manifest) -> Result<(), EditorError>,
    {
        let mut store = self.store.lock().await;

        match &self.mode {
            CheckoutMode::Latest => {
                let mut next = store.latest().clone();
                change(&mut next)?;
                store.versions.push(next);
            }
            CheckoutMode::Preview => {
                let mut next = store.preview.clone();
                change(&mut next)?;
                store.preview = next;
            }
            CheckoutMode::Historical(_) => {
                return Err(EditorError::io_kind(
                    changed,
                    ErrorKind::PermissionDenied,
                    "historical versions are read-only",
                ));
            }
            CheckoutMode::Named(_) => return Err(EditorError::not_found(self.url())),
        }
        drop(store);

        tracing::debug!(url = %self.url(), path = %changed, "archive changed");
        self.emit(changed);
        Ok(())
    }

    async fn sync(&self, kind: SyncKind, options: SyncOptions) -> Result<(), EditorError> {
        let mut store = self.store.lock().await;
        store.sync_calls.push(SyncCall {
            kind,
            paths: options.paths.clone(),
        });

        if let Some(message) = store.rejected_sync.take() {
            return Err(EditorError::conflict(message));
        }

        match kind {
            SyncKind::Publish => {
                let next = store.latest().apply_paths(&store.preview, &options.paths)?;
                store.versions.push(next);
            }
            SyncKind::Revert => {
                let next = store.preview.apply_paths(store.latest(), &options.paths)?;
                store.preview = next;
            }
        }
        drop(store);

        self.emit(path::ROOT);
        Ok(())
    }
}

impl Archive for MemoryArchive {
    fn url(&self) -> String {
        match &self.mode {
            CheckoutMode::Latest => self.base_url.clone(),
            mode => format!("{}+{}", self.base_url, mode.label()),
        }
    }

    fn mode(&self) -> &CheckoutMode {
        &self.mode
    }

    fn checkout(&self, mode: &CheckoutMode) -> Self {
        Self {
            mode: mode.clone(),
            ..self.clone()
        }
    }

    async fn info(&self) -> Result<ArchiveInfo, EditorError> {
        Ok(self.store.lock().await.info.clone())
    }

    async fn list_directory(&self, dir: &str) -> Result<Vec<DirEntry>, EditorError> {
        let mut store = self.store.lock().await;
        if let Some(message) = store.failed_listing.take() {
            return Err(EditorError::io_kind(dir, ErrorKind::Other, &message));
        }
        self.read_manifest(&store)?.list(&path::normalize(dir))
    }

    async fn read_file(&self, file_path: &str) -> Result<Bytes, EditorError> {
        let file_path = path::normalize(file_path);
        let store = self.store.lock().await;

        match self.read_manifest(&store)?.get(&file_path) {
            Some(ManifestEntry::File { oid, .. }) => store
                .objects
                .get(oid)
                .cloned()
                .ok_or_else(|| EditorError::not_found(file_path)),
            Some(ManifestEntry::Directory) => Err(EditorError::io_kind(
                file_path,
                ErrorKind::IsADirectory,
                "is a directory",
            )),
            None => Err(EditorError::not_found(file_path)),
        }
    }

    async fn write_file(&self, file_path: &str, content: Bytes) -> Result<(), EditorError> {
        let file_path = path::normalize(file_path);
        let oid = ObjectId::for_content(&content);
        let size = content.len() as u64;

        if self.mode.is_latest() || self.mode == CheckoutMode::Preview {
            let mut store = self.store.lock().await;
            store.objects.entry(oid.clone()).or_insert(content);
        }

        self.mutate(&file_path, |manifest| manifest.put_file(&file_path, oid, size))
            .await
    }

    async fn mkdir(&self, dir: &str) -> Result<(), EditorError> {
        let dir = path::normalize(dir);
        self.mutate(&dir, |manifest| manifest.mkdir(&dir)).await
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), EditorError> {
        let old_path = path::normalize(old_path);
        let new_path = path::normalize(new_path);

        // watchers see one change covering both ends
        let changed = path::parent(&old_path).unwrap_or(path::ROOT).to_string();
        self.mutate(&changed, |manifest| manifest.rename(&old_path, &new_path))
            .await
    }

    async fn unlink(&self, file_path: &str) -> Result<(), EditorError> {
        let file_path = path::normalize(file_path);
        self.mutate(&file_path, |manifest| manifest.unlink(&file_path))
            .await
    }

    async fn rmdir(&self, dir: &str, recursive: bool) -> Result<(), EditorError> {
        let dir = path::normalize(dir);
        self.mutate(&dir, |manifest| manifest.rmdir(&dir, recursive))
            .await
    }

    fn watch(&self) -> ChangeStream {
        ChangeStream::new(self.events.subscribe())
    }

    async fn diff_local_sync(&self, options: DiffOptions) -> Result<Vec<DiffEntry>, EditorError> {
        let store = self.store.lock().await;
        if !store.info.user_settings.preview_mode {
            return Ok(Vec::new());
        }

        Ok(store.preview.diff(store.latest(), options))
    }

    async fn publish_local_sync(&self, options: SyncOptions) -> Result<(), EditorError> {
        self.sync(SyncKind::Publish, options).await
    }

    async fn revert_local_sync(&self, options: SyncOptions) -> Result<(), EditorError> {
        self.sync(SyncKind::Revert, options).await
    }
}

/// Registry of in-memory archives by base URL.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchiveService {
    archives: Arc<Mutex<HashMap<String, MemoryArchive>>>,
}

impl MemoryArchiveService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty archive at `base_url`, replacing any previous one.
    pub async fn create(&self, base_url: &str, title: Option<&str>) -> MemoryArchive {
        let archive = MemoryArchive::new(base_url, title);
        self.archives
            .lock()
            .await
            .insert(base_url.to_string(), archive.clone());
        archive
    }
}

impl ArchiveService for MemoryArchiveService {
    type Archive = MemoryArchive;

    async fn open(&self, base_url: &str) -> Result<Self::Archive, EditorError> {
        self.archives
            .lock()
            .await
            .get(base_url)
            .map(|archive| archive.checkout(&CheckoutMode::Latest))
            .ok_or_else(|| EditorError::not_found(base_url))
    }
}
