use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::Archive;
use crate::artifacts::diff::diff_entry::{ChangeKind, DiffEntry};
use crate::artifacts::diff::filter::DiffFilter;
use colored::Colorize;
use std::io::Write;

impl<A: Archive> EditorSession<A> {
    /// One line per changed path, in diff order.
    pub fn status(&self, writer: &mut impl Write, filter: DiffFilter) -> anyhow::Result<()> {
        writeln!(
            writer,
            "On {} of {}",
            self.checkout().version_label(),
            self.checkout().archive_ref().base_url()
        )?;

        if self.change_set().is_empty() {
            writeln!(writer, "No changes")?;
            return Ok(());
        }

        for entry in self.change_set().filter(filter) {
            writeln!(writer, "{}", Self::colored_entry(entry))?;
        }

        Ok(())
    }

    fn colored_entry(entry: &DiffEntry) -> String {
        let status = entry.change.status_char().to_string();
        let status = match entry.change {
            ChangeKind::Added => status.green(),
            ChangeKind::Modified => status.yellow(),
            ChangeKind::Deleted => status.red(),
        };

        format!("{} {}", status, entry.committable_path())
    }
}
