//! The versioned archive as seen by the editor
//!
//! - `archive_ref`: parsing of (possibly version-qualified) archive URLs
//! - `backend`: the versioned filesystem contract every backend implements
//! - `manifest`: path listings of a single checkout, and the diff / publish /
//!   revert algorithms both bundled backends share

pub mod archive_ref;
pub mod backend;
pub mod manifest;

/// `<base>+<qualifier>`; the qualifier starts after the first `+`.
pub const VERSIONED_URL_REGEX: &str = r"^([^+]*)\+(.*)$";
pub const LATEST_QUALIFIER: &str = "latest";
pub const PREVIEW_QUALIFIER: &str = "preview";
