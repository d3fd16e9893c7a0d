use crate::areas::session::{EditorSession, with_progress};
use crate::artifacts::archive::backend::Archive;
use crate::artifacts::buffers::edit_buffer::BufferId;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::notification::Notification;
use tokio::sync::mpsc;

/// Everything the sidebar, tabs and toolbar can ask of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    CreateFile { path: String },
    CreateFolder { path: String },
    RenamePath { old_path: String, new_path: String },
    DeletePath { path: String, is_folder: bool },
    CommitPath { path: String },
    RevertPath { path: String },
    CommitAll,
    RevertAll,
    ToggleDiff,
    SaveActive,
    OpenFile { path: String },
    Edit { buffer: BufferId, content: String },
    SetActive { buffer: BufferId },
    CloseBuffer { buffer: BufferId },
    CloseOthers { keep: BufferId },
    CloseAll,
    ReorderBuffers { from: usize, to: usize },
    /// The archive changed underneath the session.
    FilesChanged,
}

impl UiEvent {
    /// Shown when the event takes longer than the progress delay.
    pub fn progress_label(&self) -> Option<&'static str> {
        match self {
            UiEvent::CreateFile { .. } | UiEvent::CreateFolder { .. } | UiEvent::SaveActive => {
                Some("Saving...")
            }
            UiEvent::RenamePath { .. } => Some("Renaming..."),
            UiEvent::DeletePath { .. } => Some("Deleting..."),
            UiEvent::CommitPath { .. } | UiEvent::CommitAll => Some("Committing..."),
            UiEvent::RevertPath { .. } | UiEvent::RevertAll => Some("Reverting..."),
            UiEvent::ToggleDiff => Some("Diffing..."),
            _ => None,
        }
    }
}

impl<A: Archive> EditorSession<A> {
    /// Runs one UI event. A failure is logged and reported as an error
    /// notification, and is also returned to the caller.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<(), EditorError> {
        let label = event.progress_label();
        tracing::debug!(event = ?event, "dispatching");

        let result = match label {
            Some(label) => {
                let notifier = self.notifier.clone();
                let delay = self.config.progress_delay;
                with_progress(notifier, delay, label, self.apply(event)).await
            }
            None => self.apply(event).await,
        };

        if let Err(error) = &result {
            tracing::warn!(error = %error, kind = ?error.kind(), "operation failed");
            self.notify(Notification::error(error.to_string()));
        }
        result
    }

    /// Serves UI events and archive change notifications until the UI side
    /// of `events` is dropped.
    ///
    /// A closed change stream is not fatal: the session keeps serving UI
    /// events on whatever state it last loaded.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<UiEvent>) {
        let mut changes = self.archive.watch();
        let mut watching = true;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        let _ = self.dispatch(event).await;
                    }
                    None => break,
                },
                change = changes.next(), if watching => match change {
                    Some(change) => {
                        tracing::debug!(path = %change.path, "archive changed");
                        let _ = self.dispatch(UiEvent::FilesChanged).await;
                    }
                    None => {
                        tracing::warn!("archive change stream closed");
                        watching = false;
                    }
                },
            }
        }

        tracing::debug!("event loop finished");
    }

    /// Full reload and re-diff after an outside change.
    pub async fn on_files_changed(&mut self) -> Result<(), EditorError> {
        self.refresh().await
    }

    async fn apply(&mut self, event: UiEvent) -> Result<(), EditorError> {
        match event {
            UiEvent::CreateFile { path } => self.create_file(&path).await.map(|_| ()),
            UiEvent::CreateFolder { path } => self.create_folder(&path).await,
            UiEvent::RenamePath { old_path, new_path } => {
                self.rename_path(&old_path, &new_path).await
            }
            UiEvent::DeletePath { path, is_folder } => self.delete_path(&path, is_folder).await,
            UiEvent::CommitPath { path } => self.commit_path(&path).await,
            UiEvent::RevertPath { path } => self.revert_path(&path).await,
            UiEvent::CommitAll => self.commit_all().await,
            UiEvent::RevertAll => self.revert_all().await,
            UiEvent::ToggleDiff => self.toggle_diff().await,
            UiEvent::SaveActive => self.save_active().await,
            UiEvent::OpenFile { path } => self.open_file(&path).await.map(|_| ()),
            UiEvent::Edit { buffer, content } => self.edit(buffer, content),
            UiEvent::SetActive { buffer } => self.set_active(buffer),
            UiEvent::CloseBuffer { buffer } => self.close_buffer(buffer),
            UiEvent::CloseOthers { keep } => self.close_others(keep),
            UiEvent::CloseAll => {
                self.close_all();
                Ok(())
            }
            UiEvent::ReorderBuffers { from, to } => {
                self.reorder_buffers(from, to);
                Ok(())
            }
            UiEvent::FilesChanged => self.on_files_changed().await,
        }
    }
}
