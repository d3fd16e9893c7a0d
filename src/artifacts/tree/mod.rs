//! In-memory projection of a checkout's files

pub mod tree_node;
