use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::{Archive, SyncOptions};
use crate::artifacts::changes::change_set::is_affected;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::notification::Notification;
use crate::artifacts::core::path;

impl<A: Archive> EditorSession<A> {
    /// Publishes one path (a folder with everything below it) to latest.
    pub async fn commit_path(&mut self, entry_path: &str) -> Result<(), EditorError> {
        let committable = self.committable_path(entry_path);

        self.publish(vec![committable], true).await?;
        self.notify(Notification::success(format!(
            "Committed {}",
            path::normalize(entry_path)
        )));
        Ok(())
    }

    /// Throws away the working changes at one path.
    pub async fn revert_path(&mut self, entry_path: &str) -> Result<(), EditorError> {
        let committable = self.committable_path(entry_path);

        self.restore(vec![committable], true).await?;
        self.notify(Notification::success(format!(
            "Reverted {}",
            path::normalize(entry_path)
        )));
        Ok(())
    }

    /// Publishes every path of the current change set, in diff order.
    pub async fn commit_all(&mut self) -> Result<(), EditorError> {
        if self.change_set.is_empty() {
            self.notify(Notification::success("Nothing to commit"));
            return Ok(());
        }

        let paths = self.change_set.to_committable_paths();
        self.publish(paths, false).await?;
        self.notify(Notification::success("Committed all changes"));
        Ok(())
    }

    pub async fn revert_all(&mut self) -> Result<(), EditorError> {
        if self.change_set.is_empty() {
            self.notify(Notification::success("Nothing to revert"));
            return Ok(());
        }

        let paths = self.change_set.to_committable_paths();
        self.restore(paths, false).await?;
        self.notify(Notification::success("Reverted all changes"));
        Ok(())
    }

    pub fn committable_path(&self, entry_path: &str) -> String {
        self.change_set
            .committable_path(entry_path, self.tree.is_container(entry_path))
    }

    /// Nothing in memory changes unless the archive accepted the publish.
    /// Once it has, the call succeeds even if the refresh that follows fails.
    async fn publish(&mut self, paths: Vec<String>, shallow: bool) -> Result<(), EditorError> {
        self.working
            .publish_local_sync(SyncOptions {
                shallow,
                paths: paths.clone(),
            })
            .await?;
        tracing::info!(paths = ?paths, "published");

        for id in self.buffers.matching(|buffer_path| is_affected(&paths, buffer_path)) {
            self.buffers.exit_diff(id)?;
        }

        self.refresh_after_sync().await;
        Ok(())
    }

    /// Like `publish`; affected buffers are reloaded from the restored
    /// content. A buffer whose file the revert removed keeps its content and
    /// is detached by the refresh.
    async fn restore(&mut self, paths: Vec<String>, shallow: bool) -> Result<(), EditorError> {
        self.working
            .revert_local_sync(SyncOptions {
                shallow,
                paths: paths.clone(),
            })
            .await?;
        tracing::info!(paths = ?paths, "reverted");

        for id in self.buffers.matching(|buffer_path| is_affected(&paths, buffer_path)) {
            let Some(buffer_path) = self.buffers.get(id).map(|buffer| buffer.path().to_string())
            else {
                continue;
            };

            match self.working.read_text(&buffer_path).await {
                Ok(content) => self.buffers.reload(id, content)?,
                Err(EditorError::NotFound { .. }) => self.buffers.exit_diff(id)?,
                Err(error) => {
                    tracing::warn!(path = %buffer_path, %error, "unable to reload reverted buffer");
                    self.buffers.exit_diff(id)?;
                }
            }
        }

        self.refresh_after_sync().await;
        Ok(())
    }

    /// The archive already changed, so a failed refresh is reported but not
    /// returned. The next watch event or refresh catches up.
    async fn refresh_after_sync(&mut self) {
        if let Err(error) = self.refresh().await {
            tracing::warn!(%error, "refresh after sync failed");
            self.notify(Notification::error(format!(
                "Unable to refresh the file tree: {error}"
            )));
        }
    }
}
