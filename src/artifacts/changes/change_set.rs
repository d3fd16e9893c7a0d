use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::DiffEntry;
use crate::artifacts::diff::filter::DiffFilter;

/// The working checkout's pending changes, in the order the archive listed
/// them.
///
/// Always rebuilt from a fresh diff after a mutation; nothing is tracked
/// across diffs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<DiffEntry>,
}

impl ChangeSet {
    pub fn new(entries: Vec<DiffEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, entry_path: &str) -> Option<&DiffEntry> {
        let entry_path = path::normalize(entry_path);
        self.entries.iter().find(|entry| entry.path == entry_path)
    }

    pub fn contains(&self, entry_path: &str) -> bool {
        self.entry(entry_path).is_some()
    }

    /// Every entry as a publish/revert path, keeping diff order.
    pub fn to_committable_paths(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(DiffEntry::committable_path)
            .collect()
    }

    /// A single path as a publish/revert path. It is marked as a directory
    /// when the diff lists it as one or when the caller knows it is a
    /// container in the working tree.
    pub fn committable_path(&self, entry_path: &str, is_container: bool) -> String {
        let normalized = path::normalize(entry_path);

        let is_directory = self
            .entry(&normalized)
            .map_or(is_container, DiffEntry::is_directory);

        if is_directory && normalized != path::ROOT {
            format!("{normalized}/")
        } else {
            normalized
        }
    }

    pub fn filter(&self, filter: DiffFilter) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(move |entry| filter.matches(entry.change))
    }
}

/// Whether publishing or reverting `paths` touches `entry_path`.
pub fn is_affected(paths: &[String], entry_path: &str) -> bool {
    paths.iter().any(|committed| {
        let (committed, _) = path::split_dir_marker(committed);
        path::is_within(entry_path, &committed)
    })
}
