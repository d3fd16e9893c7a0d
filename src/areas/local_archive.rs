//! On-disk versioned archive
//!
//! ```text
//! <root>/                      working folder, the preview checkout
//! <root>/.archive/objects/     published file contents (see `Database`)
//! <root>/.archive/versions/    one `<n>.json` manifest per version
//! <root>/.archive/settings.json
//! ```
//!
//! Version 0 is the empty archive written by `init`. Publishing, and any
//! write made through a latest handle, appends a version.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::archive::backend::{
    Archive, ArchiveInfo, ArchiveService, ChangeEvent, ChangeStream, DiffOptions, DirEntry,
    SyncOptions, UserSettings,
};
use crate::artifacts::archive::manifest::{Manifest, ManifestEntry};
use crate::artifacts::checkout::checkout::CheckoutMode;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::DiffEntry;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

pub const ARCHIVE_DIR: &str = ".archive";
const OBJECTS_DIR: &str = "objects";
const VERSIONS_DIR: &str = "versions";
const SETTINGS_FILE: &str = "settings.json";
const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VersionRecord {
    version: u64,
    created_at: DateTime<Utc>,
    entries: Manifest,
}

#[derive(Debug)]
struct LocalStore {
    root: PathBuf,
    workspace: Workspace,
    database: Database,
    lock: Mutex<()>,
    events: broadcast::Sender<ChangeEvent>,
}

impl LocalStore {
    fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_DIR)
    }

    fn versions_path(&self) -> PathBuf {
        self.archive_path().join(VERSIONS_DIR)
    }

    fn settings_path(&self) -> PathBuf {
        self.archive_path().join(SETTINGS_FILE)
    }

    fn read_info(&self) -> anyhow::Result<ArchiveInfo> {
        let settings_path = self.settings_path();
        let raw = std::fs::read_to_string(&settings_path)
            .with_context(|| format!("Unable to read {}", settings_path.display()))?;

        serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt settings file {}", settings_path.display()))
    }

    fn write_info(&self, info: &ArchiveInfo) -> anyhow::Result<()> {
        let raw = serde_json::to_vec_pretty(info).context("Unable to encode settings")?;
        Self::write_atomically(&self.settings_path(), &raw)
    }

    fn latest_version(&self) -> anyhow::Result<u64> {
        let versions_path = self.versions_path();

        std::fs::read_dir(&versions_path)
            .with_context(|| format!("Unable to list {}", versions_path.display()))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .strip_suffix(".json")?
                    .parse::<u64>()
                    .ok()
            })
            .max()
            .context("The archive has no versions")
    }

    fn read_version(&self, version: u64) -> anyhow::Result<Option<Manifest>> {
        let version_path = self.versions_path().join(format!("{version}.json"));
        if !version_path.is_file() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&version_path)
            .with_context(|| format!("Unable to read {}", version_path.display()))?;
        let record: VersionRecord = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt version file {}", version_path.display()))?;

        Ok(Some(record.entries))
    }

    fn read_latest(&self) -> anyhow::Result<Manifest> {
        let latest = self.latest_version()?;
        self.read_version(latest)?
            .with_context(|| format!("Version {latest} disappeared"))
    }

    fn append_version(&self, entries: Manifest) -> anyhow::Result<u64> {
        let version = self.latest_version()? + 1;
        self.write_version(version, entries)?;
        Ok(version)
    }

    fn write_version(&self, version: u64, entries: Manifest) -> anyhow::Result<()> {
        let record = VersionRecord {
            version,
            created_at: Utc::now(),
            entries,
        };
        let raw = serde_json::to_vec_pretty(&record).context("Unable to encode version")?;

        Self::write_atomically(&self.versions_path().join(format!("{version}.json")), &raw)?;
        tracing::debug!(version, "wrote archive version");
        Ok(())
    }

    fn write_atomically(target: &Path, content: &[u8]) -> anyhow::Result<()> {
        let dir = target
            .parent()
            .context(format!("Invalid path {}", target.display()))?;
        let temp_path = dir.join(format!("tmp-{}", rand::random::<u32>()));

        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("Unable to create {}", temp_path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Unable to write {}", temp_path.display()))?;

        std::fs::rename(&temp_path, target)
            .with_context(|| format!("Unable to rename into {}", target.display()))
    }
}

#[derive(Debug, Clone)]
pub struct LocalArchive {
    store: Arc<LocalStore>,
    mode: CheckoutMode,
}

impl LocalArchive {
    /// Turns `root` into an archive with preview mode on: the folder's
    /// content is the preview, and latest starts out empty.
    pub fn init(root: &Path, title: Option<String>) -> anyhow::Result<Self> {
        let archive_path = root.join(ARCHIVE_DIR);
        if archive_path.exists() {
            anyhow::bail!("An archive already exists at {}", root.display());
        }

        std::fs::create_dir_all(archive_path.join(OBJECTS_DIR))
            .with_context(|| format!("Unable to create {}", archive_path.display()))?;
        std::fs::create_dir_all(archive_path.join(VERSIONS_DIR))
            .with_context(|| format!("Unable to create {}", archive_path.display()))?;

        let archive = Self::from_root(root)?;
        archive.store.write_version(0, Manifest::new())?;
        archive.store.write_info(&ArchiveInfo {
            title,
            user_settings: UserSettings {
                preview_mode: true,
                is_saved: true,
            },
        })?;

        tracing::info!(root = %root.display(), "initialised archive");
        Ok(archive)
    }

    pub fn load(root: &Path) -> anyhow::Result<Self> {
        if !root.join(ARCHIVE_DIR).is_dir() {
            anyhow::bail!("No archive at {}", root.display());
        }

        Self::from_root(root)
    }

    fn from_root(root: &Path) -> anyhow::Result<Self> {
        let root = std::fs::canonicalize(root)
            .with_context(|| format!("Unable to resolve {}", root.display()))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            store: Arc::new(LocalStore {
                workspace: Workspace::new(root.clone().into_boxed_path()),
                database: Database::new(root.join(ARCHIVE_DIR).join(OBJECTS_DIR).into_boxed_path()),
                root,
                lock: Mutex::new(()),
                events,
            }),
            mode: CheckoutMode::Latest,
        })
    }

    pub fn root(&self) -> &Path {
        &self.store.root
    }

    pub async fn set_user_settings(&self, settings: UserSettings) -> Result<(), EditorError> {
        let _guard = self.store.lock.lock().await;

        let mut info = self.store.read_info()?;
        info.user_settings = settings;
        self.store.write_info(&info)?;
        drop(_guard);

        self.emit(path::ROOT);
        Ok(())
    }

    fn emit(&self, changed: &str) {
        let _ = self.store.events.send(ChangeEvent {
            path: changed.to_string(),
        });
    }

    /// Manifest backing a read-only view of this checkout.
    fn manifest(&self) -> Result<Manifest, EditorError> {
        match &self.mode {
            CheckoutMode::Latest => Ok(self.store.read_latest()?),
            CheckoutMode::Preview => Ok(self.store.workspace.scan()?),
            CheckoutMode::Historical(version) => self
                .store
                .read_version(*version)?
                .ok_or_else(|| EditorError::not_found(self.url())),
            CheckoutMode::Named(_) => Err(EditorError::not_found(self.url())),
        }
    }

    fn classify(entry_path: &str, error: io::Error) -> EditorError {
        match error.kind() {
            ErrorKind::NotFound => EditorError::not_found(entry_path),
            _ => EditorError::io(entry_path, error),
        }
    }

    /// Runs a preview change on the working folder, or a latest change as a
    /// new version.
    async fn mutate<P, L>(
        &self,
        changed: &str,
        on_preview: P,
        on_latest: L,
    ) -> Result<(), EditorError>
    where
        P: FnOnce(&Workspace) -> io::Result<()>,
        L: FnOnce(&mut Manifest, &Database) -> Result<(), EditorError>,
    {
        let guard = self.store.lock.lock().await;

        match &self.mode {
            CheckoutMode::Preview => {
                on_preview(&self.store.workspace).map_err(|error| Self::classify(changed, error))?;
            }
            CheckoutMode::Latest => {
                let mut next = self.store.read_latest()?;
                on_latest(&mut next, &self.store.database)?;
                self.store.append_version(next)?;
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
        drop(guard);

        tracing::debug!(url = %self.url(), path = %changed, "archive changed");
        self.emit(changed);
        Ok(())
    }
}

impl Archive for LocalArchive {
    fn url(&self) -> String {
        let base = self.store.root.display().to_string();
        match &self.mode {
            CheckoutMode::Latest => base,
            mode => format!("{}+{}", base, mode.label()),
        }
    }

    fn mode(&self) -> &CheckoutMode {
        &self.mode
    }

    fn checkout(&self, mode: &CheckoutMode) -> Self {
        Self {
            store: self.store.clone(),
            mode: mode.clone(),
        }
    }

    async fn info(&self) -> Result<ArchiveInfo, EditorError> {
        Ok(self.store.read_info()?)
    }

    async fn list_directory(&self, dir: &str) -> Result<Vec<DirEntry>, EditorError> {
        let dir = path::normalize(dir);
        if self.mode == CheckoutMode::Preview {
            return self
                .store
                .workspace
                .list_dir(&dir)
                .map_err(|error| Self::classify(&dir, error));
        }

        self.manifest()?.list(&dir)
    }

    async fn read_file(&self, file_path: &str) -> Result<Bytes, EditorError> {
        let file_path = path::normalize(file_path);
        if self.mode == CheckoutMode::Preview {
            return self
                .store
                .workspace
                .read_file(&file_path)
                .map(Bytes::from)
                .map_err(|error| Self::classify(&file_path, error));
        }

        match self.manifest()?.get(&file_path) {
            Some(ManifestEntry::File { oid, .. }) => Ok(self.store.database.load(oid)?),
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

        self.mutate(
            &file_path,
            |workspace| workspace.write_file(&file_path, &content),
            |manifest, database| {
                let oid = database.store(&content)?;
                manifest.put_file(&file_path, oid, content.len() as u64)
            },
        )
        .await
    }

    async fn mkdir(&self, dir: &str) -> Result<(), EditorError> {
        let dir = path::normalize(dir);

        self.mutate(
            &dir,
            |workspace| workspace.make_directory(&dir),
            |manifest, _| manifest.mkdir(&dir),
        )
        .await
    }

    async fn rename(&self, old_path: &str, new_path: &str) -> Result<(), EditorError> {
        let old_path = path::normalize(old_path);
        let new_path = path::normalize(new_path);
        if path::is_within(&new_path, &old_path) {
            return Err(EditorError::io_kind(
                new_path,
                ErrorKind::InvalidInput,
                "cannot move a directory into itself",
            ));
        }

        let changed = path::parent(&old_path).unwrap_or(path::ROOT).to_string();
        self.mutate(
            &changed,
            |workspace| workspace.rename(&old_path, &new_path),
            |manifest, _| manifest.rename(&old_path, &new_path),
        )
        .await
    }

    async fn unlink(&self, file_path: &str) -> Result<(), EditorError> {
        let file_path = path::normalize(file_path);

        self.mutate(
            &file_path,
            |workspace| workspace.remove_file(&file_path),
            |manifest, _| manifest.unlink(&file_path),
        )
        .await
    }

    async fn rmdir(&self, dir: &str, recursive: bool) -> Result<(), EditorError> {
        let dir = path::normalize(dir);

        self.mutate(
            &dir,
            |workspace| workspace.remove_directory(&dir, recursive),
            |manifest, _| manifest.rmdir(&dir, recursive),
        )
        .await
    }

    fn watch(&self) -> ChangeStream {
        ChangeStream::new(self.store.events.subscribe())
    }

    async fn diff_local_sync(&self, options: DiffOptions) -> Result<Vec<DiffEntry>, EditorError> {
        let _guard = self.store.lock.lock().await;
        if !self.store.read_info()?.user_settings.preview_mode {
            return Ok(Vec::new());
        }

        let preview = self.store.workspace.scan()?;
        let latest = self.store.read_latest()?;
        Ok(preview.diff(&latest, options))
    }

    async fn publish_local_sync(&self, options: SyncOptions) -> Result<(), EditorError> {
        let guard = self.store.lock.lock().await;

        let preview = self.store.workspace.scan()?;
        let next = self.store.read_latest()?.apply_paths(&preview, &options.paths)?;
        self.store
            .workspace
            .store_paths(&preview, &options.paths, &self.store.database)?;
        let version = self.store.append_version(next)?;
        drop(guard);

        tracing::info!(version, paths = ?options.paths, "published local changes");
        self.emit(path::ROOT);
        Ok(())
    }

    async fn revert_local_sync(&self, options: SyncOptions) -> Result<(), EditorError> {
        let guard = self.store.lock.lock().await;

        let latest = self.store.read_latest()?;
        // validates every path before the folder is touched
        self.store
            .workspace
            .scan()?
            .apply_paths(&latest, &options.paths)?;
        self.store
            .workspace
            .materialise(&latest, &options.paths, &self.store.database)?;
        drop(guard);

        tracing::info!(paths = ?options.paths, "reverted local changes");
        self.emit(path::ROOT);
        Ok(())
    }
}

/// Opens on-disk archives; the base URL is the archive's root folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalArchiveService;

impl ArchiveService for LocalArchiveService {
    type Archive = LocalArchive;

    async fn open(&self, base_url: &str) -> Result<Self::Archive, EditorError> {
        let root = Path::new(base_url);
        if !root.join(ARCHIVE_DIR).is_dir() {
            return Err(EditorError::not_found(base_url));
        }

        Ok(LocalArchive::load(root)?)
    }
}
