use crate::artifacts::core::path;
use crate::artifacts::diff::diff_entry::ChangeKind;

/// Identity of a materialised tree node.
///
/// Allocated when a node is built from a directory listing; a node keeps its
/// id until the subtree containing it is reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<TreeNode>,
    pub(crate) change: Option<ChangeKind>,
}

impl TreeNode {
    pub(crate) fn new(id: NodeId, path: String, kind: NodeKind) -> Self {
        let name = if path == path::ROOT {
            String::new()
        } else {
            path::file_name(&path).to_string()
        };

        Self {
            id,
            name,
            path,
            kind,
            children: Vec::new(),
            change: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn change(&self) -> Option<ChangeKind> {
        self.change
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
