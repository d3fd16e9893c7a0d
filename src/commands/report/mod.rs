//! Command-line views of a session
//!
//! - `status`: the change set against latest
//! - `tree`: the working checkout's file tree with change markers
//! - `cat`: one file of the working checkout

pub mod cat;
pub mod status;
pub mod tree;
