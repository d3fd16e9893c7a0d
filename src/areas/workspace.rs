use crate::areas::database::Database;
use crate::artifacts::archive::backend::DirEntry;
use crate::artifacts::archive::manifest::{Manifest, ManifestEntry};
use crate::artifacts::core::path;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".archive", ".", ".."];

/// The working folder of an on-disk archive, which is its preview checkout.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Filesystem location of an archive path.
    pub fn resolve(&self, entry_path: &str) -> PathBuf {
        path::segments(entry_path).fold(self.path.to_path_buf(), |full, segment| full.join(segment))
    }

    /// Direct children of `dir`, sorted by name.
    pub fn list_dir(&self, dir: &str) -> io::Result<Vec<DirEntry>> {
        let mut entries = std::fs::read_dir(self.resolve(dir))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if Self::is_ignored(&name) {
                    return None;
                }
                let is_container = entry.file_type().ok()?.is_dir();
                Some(DirEntry { name, is_container })
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    pub fn read_file(&self, file_path: &str) -> io::Result<Vec<u8>> {
        let full_path = self.resolve(file_path);
        if full_path.is_dir() {
            return Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"));
        }

        std::fs::read(full_path)
    }

    pub fn write_file(&self, file_path: &str, content: &[u8]) -> io::Result<()> {
        let full_path = self.resolve(file_path);
        if full_path.is_dir() {
            return Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"));
        }

        std::fs::write(full_path, content)
    }

    pub fn make_directory(&self, dir: &str) -> io::Result<()> {
        std::fs::create_dir(self.resolve(dir))
    }

    pub fn rename(&self, old_path: &str, new_path: &str) -> io::Result<()> {
        let from = self.resolve(old_path);
        let to = self.resolve(new_path);

        if !from.exists() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file or directory"));
        }
        // a plain rename would silently replace an existing file
        if to.exists() {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "already exists"));
        }

        std::fs::rename(from, to)
    }

    pub fn remove_file(&self, file_path: &str) -> io::Result<()> {
        let full_path = self.resolve(file_path);
        if full_path.is_dir() {
            return Err(io::Error::new(io::ErrorKind::IsADirectory, "is a directory"));
        }

        std::fs::remove_file(full_path)
    }

    pub fn remove_directory(&self, dir: &str, recursive: bool) -> io::Result<()> {
        if dir == path::ROOT {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "cannot remove the archive root",
            ));
        }

        if recursive {
            std::fs::remove_dir_all(self.resolve(dir))
        } else {
            std::fs::remove_dir(self.resolve(dir))
        }
    }

    /// Manifest of everything in the working folder. Objects are hashed but
    /// not stored.
    pub fn scan(&self) -> anyhow::Result<Manifest> {
        let mut manifest = Manifest::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(&entry.file_name().to_string_lossy()));

        for entry in walker {
            let entry = entry.context("Unable to walk the working folder")?;
            let entry_path = self.archive_path(entry.path())?;

            if entry.file_type().is_dir() {
                manifest.mkdir(&entry_path)?;
            } else if entry.file_type().is_file() {
                let content = std::fs::read(entry.path())
                    .with_context(|| format!("Unable to read {}", entry.path().display()))?;
                manifest.put_file(
                    &entry_path,
                    ObjectId::for_content(&content),
                    content.len() as u64,
                )?;
            }
        }

        Ok(manifest)
    }

    /// Stores the content of every file below `roots` in the database.
    pub fn store_paths(
        &self,
        manifest: &Manifest,
        roots: &[String],
        database: &Database,
    ) -> anyhow::Result<()> {
        for (file_path, oid) in manifest.files() {
            let covered = roots
                .iter()
                .any(|root| path::is_within(file_path, &path::split_dir_marker(root).0));
            if !covered || database.contains(oid) {
                continue;
            }

            let content = std::fs::read(self.resolve(file_path))
                .with_context(|| format!("Unable to read {}", file_path))?;
            let stored = database.store(&content)?;
            if &stored != oid {
                anyhow::bail!("{} changed while it was being published", file_path);
            }
        }

        Ok(())
    }

    /// Rewrites the working folder at each of `roots` to match `manifest`,
    /// deleting what `manifest` does not have.
    pub fn materialise(
        &self,
        manifest: &Manifest,
        roots: &[String],
        database: &Database,
    ) -> anyhow::Result<()> {
        for root in roots {
            let (root, _) = path::split_dir_marker(root);
            let full_path = self.resolve(&root);

            if full_path.is_dir() && root != path::ROOT {
                std::fs::remove_dir_all(&full_path)
                    .with_context(|| format!("Unable to remove directory {}", root))?;
            } else if full_path.is_file() {
                std::fs::remove_file(&full_path)
                    .with_context(|| format!("Unable to remove file {}", root))?;
            } else if root == path::ROOT {
                self.clear()?;
            }

            if root != path::ROOT && manifest.get(&root).is_none() {
                continue;
            }

            if let Some(parent) = path::parent(&root) {
                std::fs::create_dir_all(self.resolve(parent))
                    .with_context(|| format!("Unable to create directory {}", parent))?;
            }

            for (entry_path, entry) in manifest.entries() {
                if !path::is_within(entry_path, &root) {
                    continue;
                }

                match entry {
                    ManifestEntry::Directory => std::fs::create_dir_all(self.resolve(entry_path))
                        .with_context(|| format!("Unable to create directory {}", entry_path))?,
                    ManifestEntry::File { oid, .. } => {
                        let content = database.load(oid)?;
                        std::fs::write(self.resolve(entry_path), &content)
                            .with_context(|| format!("Unable to write {}", entry_path))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        for entry in self.list_dir(path::ROOT)? {
            let full_path = self.path.join(&entry.name);
            let removed = if entry.is_container {
                std::fs::remove_dir_all(&full_path)
            } else {
                std::fs::remove_file(&full_path)
            };
            removed.with_context(|| format!("Unable to remove {}", full_path.display()))?;
        }
        Ok(())
    }

    fn archive_path(&self, full_path: &Path) -> anyhow::Result<String> {
        let relative = full_path
            .strip_prefix(&self.path)
            .with_context(|| format!("{} is outside the working folder", full_path.display()))?;

        let segments = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>();
        Ok(path::normalize(&segments.join("/")))
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }
}
