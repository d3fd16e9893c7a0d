//! Change tracking against the latest version
//!
//! - `diff_entry`: one changed path as reported by the archive
//! - `filter`: change-kind filters for listings
//! - `path_trie`: segment trie answering "which diff entry covers this path"
//! - `tracker`: computing the diff and annotating the file tree with it

pub mod diff_entry;
pub mod filter;
pub mod path_trie;
pub mod tracker;
