use crate::artifacts::diff::diff_entry::ChangeKind;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const DELETED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

impl DiffFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'A' => filter |= Self::ADDED,
                'D' => filter |= Self::DELETED,
                'M' => filter |= Self::MODIFIED,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, change: ChangeKind) -> bool {
        match change {
            ChangeKind::Added => self.contains(DiffFilter::ADDED),
            ChangeKind::Deleted => self.contains(DiffFilter::DELETED),
            ChangeKind::Modified => self.contains(DiffFilter::MODIFIED),
        }
    }
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self::all()
    }
}
