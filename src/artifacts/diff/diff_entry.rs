use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn status_char(&self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
        }
    }

    /// Whether every path below a changed directory shares its change.
    ///
    /// A directory that exists on one side only was added or deleted as a
    /// whole; a modified directory says nothing about its children.
    pub fn covers_descendants(&self) -> bool {
        matches!(self, ChangeKind::Added | ChangeKind::Deleted)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One changed path between the working checkout and latest.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffEntry {
    pub path: String,
    pub change: ChangeKind,
    pub kind: EntryKind,
}

impl DiffEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// The path as the publish/revert backend expects it: directories carry
    /// a trailing separator.
    pub fn committable_path(&self) -> String {
        if self.is_directory() {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }
}

impl std::fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.change.status_char(), self.committable_path())
    }
}
