use crate::areas::session::EditorSession;
use crate::artifacts::archive::backend::Archive;
use crate::artifacts::tree::tree_node::TreeNode;
use std::io::Write;

const INDENT: &str = "  ";

impl<A: Archive> EditorSession<A> {
    /// The working checkout's tree, one node per line, children indented
    /// under their folder.
    pub fn print_tree(&self, writer: &mut impl Write) -> anyhow::Result<()> {
        Self::print_node(writer, self.tree().root(), 0)
    }

    fn print_node(writer: &mut impl Write, node: &TreeNode, depth: usize) -> anyhow::Result<()> {
        let name = match (node.path(), node.is_container()) {
            ("/", _) => "/".to_string(),
            (_, true) => format!("{}/", node.name()),
            (_, false) => node.name().to_string(),
        };

        match node.change() {
            Some(change) => writeln!(writer, "{}{} ({})", INDENT.repeat(depth), name, change)?,
            None => writeln!(writer, "{}{}", INDENT.repeat(depth), name)?,
        }

        for child in node.children() {
            Self::print_node(writer, child, depth + 1)?;
        }

        Ok(())
    }
}
