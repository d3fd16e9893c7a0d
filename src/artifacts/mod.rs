//! Archive editing data structures and algorithms
//!
//! This module contains the stateless types and algorithms of the editor:
//!
//! - `archive`: archive references, the versioned-filesystem contract and manifests
//! - `buffers`: edit buffers and their clean/dirty/diff states
//! - `changes`: the committable change set
//! - `checkout`: checkout modes and the checkout resolver
//! - `core`: errors, notifications, configuration and path helpers
//! - `diff`: diff entries, change filters and tree annotation
//! - `objects`: content-addressed object ids
//! - `tree`: file tree nodes

pub mod archive;
pub mod buffers;
pub mod changes;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod objects;
pub mod tree;
