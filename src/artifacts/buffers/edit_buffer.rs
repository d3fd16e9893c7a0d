use crate::artifacts::core::error::EditorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub(crate) u64);

impl std::fmt::Display for BufferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Clean,
    Dirty,
}

/// Read-only side-by-side comparison shown in place of the editable
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffView {
    pub left: String,
    pub right: String,
}

/// An open file.
///
/// A buffer only knows its tree node by path; it is looked up again after
/// every reload and flagged `detached` when the path is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub(crate) id: BufferId,
    pub(crate) path: String,
    pub(crate) content: String,
    pub(crate) state: BufferState,
    pub(crate) version: u64,
    pub(crate) saved_version: Option<u64>,
    pub(crate) diff: Option<DiffView>,
    pub(crate) detached: bool,
}

impl EditBuffer {
    pub(crate) fn new(id: BufferId, path: String, content: String) -> Self {
        Self {
            id,
            path,
            content,
            state: BufferState::Clean,
            version: 0,
            saved_version: None,
            diff: None,
            detached: false,
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == BufferState::Dirty
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn saved_version(&self) -> Option<u64> {
        self.saved_version
    }

    pub fn diff(&self) -> Option<&DiffView> {
        self.diff.as_ref()
    }

    pub fn in_diff(&self) -> bool {
        self.diff.is_some()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub(crate) fn edit(&mut self, content: String) -> Result<(), EditorError> {
        if self.in_diff() {
            return Err(EditorError::ReadOnlyBuffer {
                path: self.path.clone(),
            });
        }

        self.content = content;
        self.version += 1;
        self.state = BufferState::Dirty;
        Ok(())
    }

    pub(crate) fn mark_saved(&mut self) {
        self.saved_version = Some(self.version);
        self.state = BufferState::Clean;
    }

    /// Replaces the content with what is on disk, dropping unsaved edits and
    /// any diff view.
    pub(crate) fn reload(&mut self, content: String) {
        self.content = content;
        self.version += 1;
        self.saved_version = Some(self.version);
        self.state = BufferState::Clean;
        self.diff = None;
    }

    pub(crate) fn enter_diff(&mut self, left: String) {
        self.diff = Some(DiffView {
            left,
            right: self.content.clone(),
        });
    }

    /// Clean/Dirty is untouched by the diff view, so leaving it restores the
    /// prior state as is.
    pub(crate) fn exit_diff(&mut self) {
        self.diff = None;
    }
}
