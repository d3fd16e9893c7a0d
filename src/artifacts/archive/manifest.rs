//! Path listing of a single checkout
//!
//! A [`Manifest`] maps every path of a checkout (except the implicit root)
//! to either a directory or a content object. Both bundled backends keep
//! their versions and their preview as manifests, and share the algorithms
//! defined here:
//!
//! - filesystem-like mutation (`put_file`, `mkdir`, `unlink`, `rmdir`, `rename`)
//!   with the same failure modes a real filesystem reports
//! - `diff`: the local-sync diff between the preview and latest
//! - `apply_paths`: copying chosen subtrees from one manifest into another,
//!   which is what both publish (preview -> latest) and revert
//!   (latest -> preview) boil down to

use crate::artifacts::archive::backend::{DiffOptions, DirEntry};
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::{ChangeKind, DiffEntry, EntryKind};
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;

static ROOT_ENTRY: ManifestEntry = ManifestEntry::Directory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ManifestEntry {
    Directory,
    File { oid: ObjectId, size: u64 },
}

impl ManifestEntry {
    pub fn is_directory(&self) -> bool {
        matches!(self, ManifestEntry::Directory)
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self {
            ManifestEntry::Directory => EntryKind::Directory,
            ManifestEntry::File { .. } => EntryKind::File,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entry_path: &str) -> Option<&ManifestEntry> {
        if entry_path == path::ROOT {
            return Some(&ROOT_ENTRY);
        }
        self.entries.get(entry_path)
    }

    pub fn is_dir(&self, entry_path: &str) -> bool {
        self.get(entry_path).is_some_and(ManifestEntry::is_directory)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.entries.iter().filter_map(|(entry_path, entry)| match entry {
            ManifestEntry::File { oid, .. } => Some((entry_path.as_str(), oid)),
            ManifestEntry::Directory => None,
        })
    }

    pub fn list(&self, dir: &str) -> Result<Vec<DirEntry>, EditorError> {
        match self.get(dir) {
            None => Err(EditorError::not_found(dir)),
            Some(ManifestEntry::File { .. }) => Err(EditorError::io_kind(
                dir,
                ErrorKind::NotADirectory,
                "not a directory",
            )),
            Some(ManifestEntry::Directory) => Ok(self
                .children(dir)
                .into_iter()
                .map(|(name, entry)| DirEntry {
                    name: name.to_string(),
                    is_container: entry.is_directory(),
                })
                .collect()),
        }
    }

    pub fn put_file(&mut self, file_path: &str, oid: ObjectId, size: u64) -> Result<(), EditorError> {
        if self.is_dir(file_path) {
            return Err(EditorError::io_kind(
                file_path,
                ErrorKind::IsADirectory,
                "is a directory",
            ));
        }
        self.require_parent_dir(file_path)?;

        self.entries
            .insert(file_path.to_string(), ManifestEntry::File { oid, size });
        Ok(())
    }

    pub fn mkdir(&mut self, dir: &str) -> Result<(), EditorError> {
        if self.get(dir).is_some() {
            return Err(EditorError::io_kind(
                dir,
                ErrorKind::AlreadyExists,
                "already exists",
            ));
        }
        self.require_parent_dir(dir)?;

        self.entries.insert(dir.to_string(), ManifestEntry::Directory);
        Ok(())
    }

    pub fn unlink(&mut self, file_path: &str) -> Result<(), EditorError> {
        match self.get(file_path) {
            None => Err(EditorError::not_found(file_path)),
            Some(ManifestEntry::Directory) => Err(EditorError::io_kind(
                file_path,
                ErrorKind::IsADirectory,
                "is a directory",
            )),
            Some(ManifestEntry::File { .. }) => {
                self.entries.remove(file_path);
                Ok(())
            }
        }
    }

    pub fn rmdir(&mut self, dir: &str, recursive: bool) -> Result<(), EditorError> {
        if dir == path::ROOT {
            return Err(EditorError::io_kind(
                dir,
                ErrorKind::PermissionDenied,
                "cannot remove the archive root",
            ));
        }

        match self.get(dir) {
            None => Err(EditorError::not_found(dir)),
            Some(ManifestEntry::File { .. }) => Err(EditorError::io_kind(
                dir,
                ErrorKind::NotADirectory,
                "not a directory",
            )),
            Some(ManifestEntry::Directory) => {
                if !recursive && !self.children(dir).is_empty() {
                    return Err(EditorError::io_kind(
                        dir,
                        ErrorKind::DirectoryNotEmpty,
                        "directory not empty",
                    ));
                }
                self.remove_subtree(dir);
                Ok(())
            }
        }
    }

    pub fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), EditorError> {
        if old_path == path::ROOT || self.get(old_path).is_none() {
            return Err(EditorError::not_found(old_path));
        }
        if self.get(new_path).is_some() {
            return Err(EditorError::io_kind(
                new_path,
                ErrorKind::AlreadyExists,
                "already exists",
            ));
        }
        if path::is_within(new_path, old_path) {
            return Err(EditorError::io_kind(
                new_path,
                ErrorKind::InvalidInput,
                "cannot move a directory into itself",
            ));
        }
        self.require_parent_dir(new_path)?;

        for (entry_path, entry) in self.remove_subtree(old_path) {
            if let Some(moved) = path::rebase(&entry_path, old_path, new_path) {
                self.entries.insert(moved, entry);
            }
        }
        Ok(())
    }

    /// Shallow or deep listing of what differs between `self` (the preview)
    /// and `latest`, walking both in name order.
    pub fn diff(&self, latest: &Manifest, options: DiffOptions) -> Vec<DiffEntry> {
        let mut changes = Vec::new();
        self.diff_dir(latest, path::ROOT, options, &mut changes);
        changes
    }

    /// A copy of `self` where every path in `paths` (and everything below
    /// it) is replaced by what `source` has there, or removed when `source`
    /// has nothing.
    ///
    /// Every path is validated before anything is applied, so a path missing
    /// on both sides rejects the whole call.
    pub fn apply_paths(&self, source: &Manifest, paths: &[String]) -> Result<Manifest, EditorError> {
        let targets = paths
            .iter()
            .map(|p| path::split_dir_marker(p).0)
            .collect::<Vec<_>>();

        if let Some(missing) = targets
            .iter()
            .find(|p| source.get(p).is_none() && self.get(p).is_none())
        {
            return Err(EditorError::not_found(missing.as_str()));
        }

        let mut next = self.clone();
        for target in &targets {
            next.remove_subtree(target);

            if source.get(target).is_none() {
                continue;
            }

            next.ensure_ancestors(target);
            for (entry_path, entry) in source.subtree(target) {
                next.entries.insert(entry_path.clone(), entry.clone());
            }
        }

        Ok(next)
    }

    fn children(&self, dir: &str) -> Vec<(&str, &ManifestEntry)> {
        let prefix = if dir == path::ROOT {
            path::ROOT.to_string()
        } else {
            format!("{dir}/")
        };

        self.entries
            .range(prefix.clone()..)
            .take_while(|(entry_path, _)| entry_path.starts_with(&prefix))
            .map(|(entry_path, entry)| (&entry_path[prefix.len()..], entry))
            .filter(|(name, _)| !name.contains('/'))
            .collect()
    }

    fn subtree(&self, root: &str) -> Vec<(&String, &ManifestEntry)> {
        self.entries
            .iter()
            .filter(|(entry_path, _)| path::is_within(entry_path, root))
            .collect()
    }

    fn remove_subtree(&mut self, root: &str) -> Vec<(String, ManifestEntry)> {
        let doomed = self
            .entries
            .keys()
            .filter(|entry_path| path::is_within(entry_path, root))
            .cloned()
            .collect::<Vec<_>>();

        doomed
            .into_iter()
            .filter_map(|entry_path| {
                let entry = self.entries.remove(&entry_path)?;
                Some((entry_path, entry))
            })
            .collect()
    }

    // parents are created before children; a file in the way becomes a directory
    fn ensure_ancestors(&mut self, entry_path: &str) {
        let mut ancestors = Vec::new();
        let mut current = path::parent(entry_path);
        while let Some(ancestor) = current {
            if ancestor == path::ROOT {
                break;
            }
            ancestors.push(ancestor.to_string());
            current = path::parent(ancestor);
        }

        for ancestor in ancestors.into_iter().rev() {
            self.entries.insert(ancestor, ManifestEntry::Directory);
        }
    }

    fn require_parent_dir(&self, entry_path: &str) -> Result<(), EditorError> {
        let Some(parent) = path::parent(entry_path) else {
            return Err(EditorError::io_kind(
                entry_path,
                ErrorKind::InvalidInput,
                "the archive root cannot be replaced",
            ));
        };

        match self.get(parent) {
            Some(ManifestEntry::Directory) => Ok(()),
            Some(ManifestEntry::File { .. }) => Err(EditorError::io_kind(
                parent,
                ErrorKind::NotADirectory,
                "not a directory",
            )),
            None => Err(EditorError::not_found(parent)),
        }
    }

    fn diff_dir(
        &self,
        latest: &Manifest,
        dir: &str,
        options: DiffOptions,
        changes: &mut Vec<DiffEntry>,
    ) {
        let names = self
            .children(dir)
            .into_iter()
            .chain(latest.children(dir))
            .map(|(name, _)| name.to_string())
            .collect::<BTreeSet<_>>();

        for name in names {
            let child = path::join(dir, &name);

            match (self.entries.get(&child), latest.entries.get(&child)) {
                (Some(ManifestEntry::Directory), Some(ManifestEntry::Directory)) => {
                    self.diff_dir(latest, &child, options, changes);
                }
                (
                    Some(ManifestEntry::File { oid, size }),
                    Some(ManifestEntry::File {
                        oid: latest_oid,
                        size: latest_size,
                    }),
                ) => {
                    let changed = if options.compare_content {
                        oid != latest_oid
                    } else {
                        size != latest_size
                    };
                    if changed {
                        changes.push(DiffEntry::new(child, ChangeKind::Modified, EntryKind::File));
                    }
                }
                (Some(entry), Some(_)) => {
                    changes.push(DiffEntry::new(
                        child.clone(),
                        ChangeKind::Modified,
                        entry.entry_kind(),
                    ));
                    if !options.shallow && entry.is_directory() {
                        self.push_descendants(&child, ChangeKind::Added, changes);
                    }
                }
                (Some(entry), None) => {
                    changes.push(DiffEntry::new(
                        child.clone(),
                        ChangeKind::Added,
                        entry.entry_kind(),
                    ));
                    if !options.shallow && entry.is_directory() {
                        self.push_descendants(&child, ChangeKind::Added, changes);
                    }
                }
                (None, Some(entry)) => {
                    changes.push(DiffEntry::new(
                        child.clone(),
                        ChangeKind::Deleted,
                        entry.entry_kind(),
                    ));
                    if !options.shallow && entry.is_directory() {
                        latest.push_descendants(&child, ChangeKind::Deleted, changes);
                    }
                }
                (None, None) => {}
            }
        }
    }

    fn push_descendants(&self, dir: &str, change: ChangeKind, changes: &mut Vec<DiffEntry>) {
        for (name, entry) in self.children(dir) {
            let child = path::join(dir, name);
            changes.push(DiffEntry::new(child.clone(), change, entry.entry_kind()));
            if entry.is_directory() {
                self.push_descendants(&child, change, changes);
            }
        }
    }
}
