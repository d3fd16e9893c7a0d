use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::DiffEntry;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Position of the entry in diff order.
    index: usize,
    /// Whether paths below this one inherit the entry.
    inheritable: bool,
}

/// Segment trie over the paths of a diff.
///
/// Answers "which diff entry covers this path" without rescanning the diff
/// for every tree node. A path is covered by the entry naming it exactly, or
/// by an entry naming one of its ancestors at a segment boundary when that
/// entry's change applies to everything below it. When several entries
/// cover a path the one earliest in diff order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTrie {
    slot: Option<Slot>,
    children: HashMap<String, PathTrie>,
}

impl PathTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut trie = Self::new();
        for (index, entry) in entries.iter().enumerate() {
            trie.insert(&entry.path, index, entry.change.covers_descendants());
        }
        trie
    }

    pub fn insert(&mut self, entry_path: &str, index: usize, inheritable: bool) {
        let mut node = self;
        for segment in path::segments(entry_path) {
            node = node.children.entry(segment.to_string()).or_default();
        }

        // a later duplicate never displaces an earlier entry
        if node.slot.is_none() {
            node.slot = Some(Slot { index, inheritable });
        }
    }

    /// Index of the covering entry for `node_path`, if any.
    pub fn lookup(&self, node_path: &str) -> Option<usize> {
        let segments = path::segments(node_path).collect::<Vec<_>>();
        let mut best: Option<usize> = None;
        let mut node = self;

        for (depth, segment) in segments.iter().enumerate() {
            // the root entry only ever names the root itself
            if depth > 0
                && let Some(slot) = node.slot
                && slot.inheritable
            {
                best = Some(best.map_or(slot.index, |b| b.min(slot.index)));
            }

            match node.children.get(*segment) {
                Some(child) => node = child,
                None => return best,
            }
        }

        if let Some(slot) = node.slot {
            best = Some(best.map_or(slot.index, |b| b.min(slot.index)));
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none() && self.children.is_empty()
    }
}
