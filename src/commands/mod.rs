//! Editor command implementations
//!
//! Commands are `impl EditorSession` blocks, split in two groups:
//!
//! - `editor`: the operations the editing UI triggers (file operations,
//!   commit/revert, buffers, the event loop)
//! - `report`: read-only renderings of a session for the command line
//!   (status, tree, cat)

pub mod editor;
pub mod report;
