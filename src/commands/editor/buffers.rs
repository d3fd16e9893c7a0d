use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::Archive;
use crate::artifacts::buffers::edit_buffer::BufferId;
use crate::artifacts::checkout::checkout::CheckoutMode;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use bytes::Bytes;

impl<A: Archive> EditorSession<A> {
    /// Opens `file_path` from the working checkout and makes it the active
    /// buffer. A path that is already open is only activated.
    pub async fn open_file(&mut self, file_path: &str) -> Result<BufferId, EditorError> {
        let file_path = path::normalize(file_path);

        let id = match self.buffers.by_path(&file_path) {
            Some(buffer) => buffer.id(),
            None => {
                let content = self.working.read_text(&file_path).await?;
                self.buffers.open(&file_path, content)
            }
        };

        self.buffers.set_active(id)?;
        Ok(id)
    }

    pub fn edit(&mut self, id: BufferId, content: String) -> Result<(), EditorError> {
        self.buffers.edit(id, content)
    }

    pub fn set_active(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.buffers.set_active(id)
    }

    pub fn close_buffer(&mut self, id: BufferId) -> Result<(), EditorError> {
        self.buffers
            .close(id)
            .map(|_| ())
            .ok_or_else(|| EditorError::not_found(format!("buffer {id}")))
    }

    pub fn close_others(&mut self, keep: BufferId) -> Result<(), EditorError> {
        self.buffers.close_others(keep)
    }

    pub fn close_all(&mut self) {
        self.buffers.close_all();
    }

    pub fn reorder_buffers(&mut self, from: usize, to: usize) {
        if !self.buffers.reorder(from, to) {
            tracing::debug!(from, to, "ignored out-of-range reorder");
        }
    }

    /// Writes the active buffer to the working checkout.
    pub async fn save_active(&mut self) -> Result<(), EditorError> {
        let buffer = self.buffers.active().ok_or(EditorError::NoActiveBuffer)?;
        let (id, buffer_path) = (buffer.id(), buffer.path().to_string());
        let content = Bytes::from(buffer.content().to_string());

        self.working.write_file(&buffer_path, content).await?;
        self.buffers.mark_saved(id)?;
        tracing::info!(path = %buffer_path, "saved");

        self.refresh_path(&buffer_path).await
    }

    /// Shows the active buffer against its counterpart, or leaves the diff
    /// view when it is already shown.
    ///
    /// The counterpart is latest when working on any other checkout, and the
    /// preview when working on latest. A file missing there compares
    /// against empty content.
    pub async fn toggle_diff(&mut self) -> Result<(), EditorError> {
        let buffer = self.buffers.active().ok_or(EditorError::NoActiveBuffer)?;
        let (id, buffer_path, in_diff) = (buffer.id(), buffer.path().to_string(), buffer.in_diff());
        if in_diff {
            return self.buffers.exit_diff(id);
        }

        let counterpart = if self.checkout.mode().is_latest() {
            self.archive.checkout(&CheckoutMode::Preview)
        } else {
            self.archive.checkout(&CheckoutMode::Latest)
        };

        let left = match counterpart.read_text(&buffer_path).await {
            Ok(content) => content,
            Err(EditorError::NotFound { .. }) => String::new(),
            Err(error) => return Err(error),
        };

        self.buffers.enter_diff(id, left)
    }
}
