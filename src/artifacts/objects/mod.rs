//! Content-addressed objects
//!
//! File contents are stored once per distinct content and identified by the
//! SHA-1 hash of their bytes. Manifests refer to contents by [`object_id::ObjectId`].

pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
