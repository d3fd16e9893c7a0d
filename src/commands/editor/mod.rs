//! Editor operations
//!
//! Every operation the UI can trigger, implemented as `impl EditorSession`
//! blocks:
//!
//! - `files`: create, rename and delete files and folders
//! - `changes`: commit and revert single paths or the whole change set
//! - `buffers`: open, edit, save, diff and arrange edit buffers
//! - `events`: the UI event surface, its error reporting and the event loop

pub mod buffers;
pub mod changes;
pub mod events;
pub mod files;
