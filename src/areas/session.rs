use crate::areas::buffers::BufferRegistry;
use crate::areas::file_tree::FileTree;
use crate::artifacts::archive::archive_ref::ArchiveRef;
use crate::artifacts::archive::backend::{Archive, ArchiveService};
use crate::artifacts::buffers::edit_buffer::{BufferId, EditBuffer};
use crate::artifacts::changes::change_set::ChangeSet;
use crate::artifacts::checkout::checkout::Checkout;
use crate::artifacts::checkout::resolver::CheckoutResolver;
use crate::artifacts::core::config::SessionConfig;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::notification::{Notification, Notifier};
use crate::artifacts::diff::diff_entry::DiffEntry;
use crate::artifacts::diff::tracker::DiffTracker;
use crate::artifacts::tree::tree_node::TreeNode;
use std::future::Future;
use std::time::Duration;

/// What the UI renders: a copy of the session state as of one installed
/// refresh.
#[derive(Debug, Clone)]
pub struct EditorSnapshot {
    pub root: TreeNode,
    pub diff: Vec<DiffEntry>,
    pub open_buffers: Vec<EditBuffer>,
    pub active: Option<BufferId>,
    pub checkout: Checkout,
    pub generation: u64,
}

/// A reloaded tree and its diff, computed without touching the installed
/// state.
#[derive(Debug)]
pub(crate) struct Refresh {
    generation: u64,
    tree: FileTree,
    change_set: ChangeSet,
}

/// One editing session on one checkout of an archive.
///
/// Owns everything the editor works with: the archive handles, the resolved
/// checkout, the file tree, the current change set and the open buffers.
/// Operations live in `commands` as `impl EditorSession` blocks and take
/// `&mut self`, so state changes never interleave.
#[derive(Debug)]
pub struct EditorSession<A: Archive> {
    /// The archive at its canonical latest checkout.
    pub(crate) archive: A,
    /// The checkout being edited.
    pub(crate) working: A,
    pub(crate) checkout: Checkout,
    pub(crate) tree: FileTree,
    pub(crate) change_set: ChangeSet,
    pub(crate) buffers: BufferRegistry,
    pub(crate) notifier: Notifier,
    pub(crate) config: SessionConfig,
    /// Generation of the installed refresh.
    pub(crate) generation: u64,
    /// Last generation handed out.
    pub(crate) issued: u64,
}

impl<A: Archive> EditorSession<A> {
    /// Opens `url` (e.g. `dat://X`, `dat://X+preview`, `dat://X+3`), resolves
    /// the working checkout, loads its tree and diff, and opens the default
    /// file when the archive root has one.
    pub async fn open<S>(
        service: &S,
        url: &str,
        config: SessionConfig,
        notifier: Notifier,
    ) -> Result<Self, EditorError>
    where
        S: ArchiveService<Archive = A>,
    {
        let archive_ref = ArchiveRef::try_parse(url)?;
        let archive = service.open(archive_ref.base_url()).await?;
        let info = archive.info().await?;

        let checkout = CheckoutResolver::resolve(&archive_ref, &info.user_settings);
        let working = archive.checkout(checkout.mode());

        let mut tree = FileTree::load(&working).await?;
        let entries = DiffTracker::compute(&working, config.compare_content).await?;
        DiffTracker::annotate(tree.root_mut(), &entries);

        let mut session = Self {
            archive,
            working,
            checkout,
            tree,
            change_set: ChangeSet::new(entries),
            buffers: BufferRegistry::new(),
            notifier,
            config,
            generation: 0,
            issued: 0,
        };

        let default_file = session
            .tree
            .default_file(&session.config.default_file)
            .map(|node| node.path().to_string());
        if let Some(default_file) = default_file {
            session.open_file(&default_file).await?;
        }

        tracing::info!(
            url = %session.checkout.url(),
            version = %session.checkout.version_label(),
            historical = session.checkout.is_historical(),
            "opened editor session"
        );
        Ok(session)
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn working(&self) -> &A {
        &self.working
    }

    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn change_set(&self) -> &ChangeSet {
        &self.change_set
    }

    pub fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            root: self.tree.root().clone(),
            diff: self.change_set.entries().to_vec(),
            open_buffers: self.buffers.buffers().to_vec(),
            active: self.buffers.active().map(EditBuffer::id),
            checkout: self.checkout.clone(),
            generation: self.generation,
        }
    }

    /// Full reload and re-diff.
    pub async fn refresh(&mut self) -> Result<(), EditorError> {
        let refresh = self.prepare_refresh(None).await?;
        self.install(refresh);
        Ok(())
    }

    /// Reload of the container around `changed` only, then a full re-diff.
    pub async fn refresh_path(&mut self, changed: &str) -> Result<(), EditorError> {
        let refresh = self.prepare_refresh(Some(changed)).await?;
        self.install(refresh);
        Ok(())
    }

    pub(crate) async fn prepare_refresh(
        &mut self,
        changed: Option<&str>,
    ) -> Result<Refresh, EditorError> {
        self.issued += 1;
        let generation = self.issued;

        let mut tree = self.tree.clone();
        match changed {
            Some(changed) => {
                tree.reload_path(&self.working, changed).await?;
            }
            None => tree.reload(&self.working).await?,
        }

        let entries = DiffTracker::compute(&self.working, self.config.compare_content).await?;
        DiffTracker::annotate(tree.root_mut(), &entries);

        Ok(Refresh {
            generation,
            tree,
            change_set: ChangeSet::new(entries),
        })
    }

    /// Installs `refresh` unless a newer one is already installed. Returns
    /// whether it was installed.
    pub(crate) fn install(&mut self, refresh: Refresh) -> bool {
        if refresh.generation < self.generation {
            tracing::debug!(
                stale = refresh.generation,
                installed = self.generation,
                "discarded stale refresh"
            );
            return false;
        }

        self.generation = refresh.generation;
        self.tree = refresh.tree;
        self.change_set = refresh.change_set;
        self.buffers.reassociate(&self.tree);
        true
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }
}

/// Runs `operation`, announcing `label` as progress if it is still running
/// after `delay`.
pub(crate) async fn with_progress<T>(
    notifier: Notifier,
    delay: Duration,
    label: &str,
    operation: impl Future<Output = T>,
) -> T {
    tokio::pin!(operation);

    tokio::select! {
        biased;
        output = &mut operation => return output,
        _ = tokio::time::sleep(delay) => notifier.notify(Notification::progress(label)),
    }

    operation.await
}
