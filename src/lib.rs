//! archedit - checkout resolution and change tracking for versioned archives
//!
//! Module layout:
//! - areas: stateful components (session, file tree, buffer registry, backends)
//! - artifacts: data types and algorithms (checkouts, diffs, change sets, manifests)
//! - commands: session operations, as `impl EditorSession` blocks

pub mod areas;
pub mod artifacts;
pub mod commands;
