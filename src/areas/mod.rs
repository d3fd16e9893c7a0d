//! Stateful editor components
//!
//! - `buffers`: the registry of open edit buffers
//! - `database`: content-addressed object store of the on-disk archive
//! - `file_tree`: in-memory tree of one checkout's files
//! - `local_archive`: on-disk versioned archive
//! - `memory_archive`: in-process versioned archive
//! - `session`: the editor session tying everything together
//! - `workspace`: working folder of the on-disk archive

pub mod buffers;
pub(crate) mod database;
pub mod file_tree;
pub mod local_archive;
pub mod memory_archive;
pub mod session;
pub(crate) mod workspace;
