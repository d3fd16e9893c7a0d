use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::Archive;
use crate::artifacts::buffers::edit_buffer::BufferId;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::notification::Notification;
use crate::artifacts::core::path;
use bytes::Bytes;

impl<A: Archive> EditorSession<A> {
    /// Creates an empty file and opens it as the active buffer.
    pub async fn create_file(&mut self, file_path: &str) -> Result<BufferId, EditorError> {
        let file_path = path::normalize(file_path);

        self.working.write_file(&file_path, Bytes::new()).await?;
        tracing::info!(path = %file_path, "created file");

        self.refresh_path(&file_path).await?;
        self.open_file(&file_path).await
    }

    pub async fn create_folder(&mut self, dir: &str) -> Result<(), EditorError> {
        let dir = path::normalize(dir);

        self.working.mkdir(&dir).await?;
        tracing::info!(path = %dir, "created folder");

        self.refresh_path(&dir).await
    }

    /// Renames a file or folder. Open buffers at or below `old_path` follow
    /// it.
    pub async fn rename_path(&mut self, old_path: &str, new_path: &str) -> Result<(), EditorError> {
        let old_path = path::normalize(old_path);
        let new_path = path::normalize(new_path);

        self.working.rename(&old_path, &new_path).await?;
        tracing::info!(from = %old_path, to = %new_path, "renamed");

        self.buffers.repath(&old_path, &new_path);
        self.refresh().await
    }

    /// Deletes a file, or a folder with everything in it. Buffers open on
    /// deleted paths stay open, detached.
    pub async fn delete_path(&mut self, entry_path: &str, is_folder: bool) -> Result<(), EditorError> {
        let entry_path = path::normalize(entry_path);

        if is_folder {
            self.working.rmdir(&entry_path, true).await?;
        } else {
            self.working.unlink(&entry_path).await?;
        }
        tracing::info!(path = %entry_path, is_folder, "deleted");

        self.refresh_path(&entry_path).await?;
        self.notify(Notification::success(format!("Deleted {entry_path}")));
        Ok(())
    }
}
