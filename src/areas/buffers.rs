use crate::areas::file_tree::FileTree;
use crate::artifacts::buffers::edit_buffer::{BufferId, EditBuffer};
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use std::collections::HashMap;

/// The open edit buffers, in tab order, plus which one is active.
///
/// Buffers are keyed by normalized path. They never hold a reference into
/// the file tree: after every reload [`BufferRegistry::reassociate`] looks
/// each path up again.
#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: Vec<EditBuffer>,
    by_path: HashMap<String, BufferId>,
    active: Option<BufferId>,
    next_id: u64,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `buffer_path` with `content`, or returns the buffer already open
    /// there without touching it.
    pub fn open(&mut self, buffer_path: &str, content: String) -> BufferId {
        let buffer_path = path::normalize(buffer_path);
        if let Some(id) = self.by_path.get(&buffer_path) {
            return *id;
        }

        let id = BufferId(self.next_id);
        self.next_id += 1;

        tracing::debug!(path = %buffer_path, buffer = %id, "opened buffer");
        self.by_path.insert(buffer_path.clone(), id);
        self.buffers.push(EditBuffer::new(id, buffer_path, content));
        id
    }

    pub fn buffers(&self) -> &[EditBuffer] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn get(&self, id: BufferId) -> Option<&EditBuffer> {
        self.buffers.iter().find(|buffer| buffer.id == id)
    }

    pub fn by_path(&self, buffer_path: &str) -> Option<&EditBuffer> {
        let id = self.by_path.get(&path::normalize(buffer_path))?;
        self.get(*id)
    }

    pub fn active(&self) -> Option<&EditBuffer> {
        self.get(self.active?)
    }

    pub fn set_active(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.require(id)?;
        self.active = Some(id);
        Ok(())
    }

    pub fn has_dirty(&self) -> bool {
        self.buffers.iter().any(EditBuffer::is_dirty)
    }

    pub fn edit(&mut self, id: BufferId, content: String) -> Result<(), EditorError> {
        self.require(id)?.edit(content)
    }

    pub fn mark_saved(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.require(id)?.mark_saved();
        Ok(())
    }

    pub fn reload(&mut self, id: BufferId, content: String) -> Result<(), EditorError> {
        self.require(id)?.reload(content);
        Ok(())
    }

    /// Shows `left` against the buffer's current content.
    pub fn enter_diff(&mut self, id: BufferId, left: String) -> Result<(), EditorError> {
        self.require(id)?.enter_diff(left);
        Ok(())
    }

    pub fn exit_diff(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.require(id)?.exit_diff();
        Ok(())
    }

    /// Closes a buffer. When it was active, the buffer now at its position
    /// (or the last one) becomes active.
    pub fn close(&mut self, id: BufferId) -> Option<EditBuffer> {
        let index = self.buffers.iter().position(|buffer| buffer.id == id)?;
        let buffer = self.buffers.remove(index);
        self.by_path.remove(&buffer.path);

        if self.active == Some(id) {
            self.active = self
                .buffers
                .get(index)
                .or_else(|| self.buffers.last())
                .map(EditBuffer::id);
        }

        tracing::debug!(path = %buffer.path, buffer = %id, "closed buffer");
        Some(buffer)
    }

    pub fn close_others(&mut self, keep: BufferId) -> Result<(), EditorError> {
        self.require(keep)?;

        self.buffers.retain(|buffer| buffer.id == keep);
        self.by_path.retain(|_, id| *id == keep);
        self.active = Some(keep);
        Ok(())
    }

    pub fn close_all(&mut self) {
        self.buffers.clear();
        self.by_path.clear();
        self.active = None;
    }

    /// Moves the buffer at `from` to position `to`. Out-of-range positions
    /// leave the order alone.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.buffers.len() || to >= self.buffers.len() {
            return false;
        }

        let buffer = self.buffers.remove(from);
        self.buffers.insert(to, buffer);
        true
    }

    /// Re-resolves every buffer against a freshly loaded tree.
    pub fn reassociate(&mut self, tree: &FileTree) {
        for buffer in self.buffers.iter_mut() {
            let detached = tree.find(&buffer.path).is_none_or(|node| node.is_container());
            if detached != buffer.detached {
                tracing::debug!(path = %buffer.path, detached, "buffer association changed");
            }
            buffer.detached = detached;
        }
    }

    /// Buffers at or below `old_path` follow a rename to `new_path`.
    pub fn repath(&mut self, old_path: &str, new_path: &str) {
        let old_path = path::normalize(old_path);
        let new_path = path::normalize(new_path);

        for buffer in self.buffers.iter_mut() {
            if let Some(moved) = path::rebase(&buffer.path, &old_path, &new_path) {
                buffer.path = moved;
            }
        }

        self.by_path = self
            .buffers
            .iter()
            .map(|buffer| (buffer.path.clone(), buffer.id))
            .collect();
    }

    /// Ids of the buffers whose path satisfies `predicate`.
    pub fn matching(&self, predicate: impl Fn(&str) -> bool) -> Vec<BufferId> {
        self.buffers
            .iter()
            .filter(|buffer| predicate(&buffer.path))
            .map(EditBuffer::id)
            .collect()
    }

    fn require(&mut self, id: BufferId) -> Result<&mut EditBuffer, EditorError> {
        self.buffers
            .iter_mut()
            .find(|buffer| buffer.id == id)
            .ok_or_else(|| EditorError::not_found(format!("buffer {id}")))
    }
}
