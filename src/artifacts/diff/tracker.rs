use crate::artifacts::archive::backend::{Archive, DiffOptions};
use crate::artifacts::core::error::EditorError;
use crate::artifacts::diff::diff_entry::DiffEntry;
use crate::artifacts::diff::path_trie::PathTrie;
use crate::artifacts::tree::tree_node::TreeNode;

/// Computes the working checkout's changes against latest and marks them on
/// the file tree.
pub struct DiffTracker;

impl DiffTracker {
    /// Asks the archive for a shallow, content-comparing diff. Directories
    /// added or removed as a whole come back as a single entry; `annotate`
    /// reconciles them against the full tree.
    pub async fn compute<A: Archive>(
        archive: &A,
        compare_content: bool,
    ) -> Result<Vec<DiffEntry>, EditorError> {
        let entries = archive
            .diff_local_sync(DiffOptions {
                compare_content,
                shallow: true,
            })
            .await?;

        tracing::debug!(url = %archive.url(), changes = entries.len(), "computed diff");
        Ok(entries)
    }

    /// Sets every node's change from the first diff entry covering its path,
    /// clearing it when none does.
    ///
    /// Ancestors are not bubbled up: a directory only carries a change when
    /// the diff lists it (or an ancestor added/deleted as a whole).
    pub fn annotate(root: &mut TreeNode, entries: &[DiffEntry]) {
        let trie = PathTrie::from_entries(entries);
        Self::annotate_node(root, entries, &trie);
    }

    fn annotate_node(node: &mut TreeNode, entries: &[DiffEntry], trie: &PathTrie) {
        node.change = trie
            .lookup(&node.path)
            .and_then(|index| entries.get(index))
            .map(|entry| entry.change);

        for child in node.children.iter_mut() {
            Self::annotate_node(child, entries, trie);
        }
    }
}
