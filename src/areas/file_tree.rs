use crate::artifacts::archive::backend::Archive;
use crate::artifacts::core::error::EditorError;
use crate::artifacts::core::path;
use crate::artifacts::tree::tree_node::{NodeId, NodeKind, TreeNode};

/// In-memory projection of one checkout's directory structure.
#[derive(Debug, Clone)]
pub struct FileTree {
    root: TreeNode,
    next_id: u64,
}

impl FileTree {
    /// Lists the whole checkout, one directory at a time. The first listing
    /// failure aborts the load.
    pub async fn load<A: Archive>(archive: &A) -> Result<Self, EditorError> {
        let mut next_id = 0;
        let root = Self::load_node(archive, path::ROOT.to_string(), NodeKind::Container, &mut next_id)
            .await?;

        tracing::debug!(url = %archive.url(), nodes = next_id, "loaded file tree");
        Ok(Self { root, next_id })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut TreeNode {
        &mut self.root
    }

    /// Node at `node_path`. `None` when a segment is missing or when the path
    /// runs through a file.
    pub fn find(&self, node_path: &str) -> Option<&TreeNode> {
        let mut node = &self.root;
        for segment in path::segments(node_path) {
            if !node.is_container() {
                return None;
            }
            node = node.child(segment)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, node_path: &str) -> Option<&mut TreeNode> {
        let mut node = &mut self.root;
        for segment in path::segments(node_path) {
            if !node.is_container() {
                return None;
            }
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    pub fn is_container(&self, node_path: &str) -> bool {
        self.find(node_path).is_some_and(TreeNode::is_container)
    }

    /// Root-level file named `name`, if there is one.
    pub fn default_file(&self, name: &str) -> Option<&TreeNode> {
        self.root
            .children()
            .iter()
            .find(|child| !child.is_container() && child.name() == name)
    }

    /// Replaces the whole tree. Every node gets a new id; on failure the
    /// current tree is kept.
    pub async fn reload<A: Archive>(&mut self, archive: &A) -> Result<(), EditorError> {
        let mut next_id = self.next_id;
        let root = Self::load_node(archive, path::ROOT.to_string(), NodeKind::Container, &mut next_id)
            .await?;

        self.root = root;
        self.next_id = next_id;
        Ok(())
    }

    /// Reloads the children of the nearest container above `node_path`.
    /// `node_path` itself may already be gone. Nodes outside that container
    /// keep their ids, and so does the container itself. Returns the
    /// reloaded container's path.
    pub async fn reload_path<A: Archive>(
        &mut self,
        archive: &A,
        node_path: &str,
    ) -> Result<String, EditorError> {
        let container = self.nearest_container(node_path);

        let mut next_id = self.next_id;
        let children = Self::load_children(archive, &container, &mut next_id).await?;

        if let Some(node) = self.find_mut(&container) {
            node.children = children;
        }
        self.next_id = next_id;

        tracing::debug!(path = %container, "reloaded subtree");
        Ok(container)
    }

    fn nearest_container(&self, node_path: &str) -> String {
        let node_path = path::normalize(node_path);
        let Some(parent) = path::parent(&node_path) else {
            return path::ROOT.to_string();
        };

        let mut node = &self.root;
        for segment in path::segments(parent) {
            match node.child(segment) {
                Some(child) if child.is_container() => node = child,
                _ => break,
            }
        }
        node.path().to_string()
    }

    async fn load_node<A: Archive>(
        archive: &A,
        node_path: String,
        kind: NodeKind,
        next_id: &mut u64,
    ) -> Result<TreeNode, EditorError> {
        let mut node = TreeNode::new(Self::allocate(next_id), node_path, kind);

        if kind == NodeKind::Container {
            let children = Self::load_children(archive, &node.path, next_id).await?;
            node.children = children;
        }

        Ok(node)
    }

    async fn load_children<A: Archive>(
        archive: &A,
        dir: &str,
        next_id: &mut u64,
    ) -> Result<Vec<TreeNode>, EditorError> {
        let entries = archive.list_directory(dir).await?;

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let kind = if entry.is_container {
                NodeKind::Container
            } else {
                NodeKind::File
            };
            let child = Box::pin(Self::load_node(
                archive,
                path::join(dir, &entry.name),
                kind,
                next_id,
            ))
            .await?;
            children.push(child);
        }

        Ok(children)
    }

    fn allocate(next_id: &mut u64) -> NodeId {
        let id = NodeId(*next_id);
        *next_id += 1;
        id
    }
}
