//! Working checkout selection
//!
//! An editor session works on exactly one checkout of the archive: the
//! canonical latest version, the preview (uncommitted local work), another
//! named mode, or a read-only historical version. This module decides which
//! one from the opened URL and the archive's user settings.

pub mod checkout;
pub mod resolver;
