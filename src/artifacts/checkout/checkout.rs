use crate::artifacts::archive::archive_ref::ArchiveRef;
use crate::artifacts::archive::{LATEST_QUALIFIER, PREVIEW_QUALIFIER};

/// Which version of the archive a checkout shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckoutMode {
    /// The canonical, most recently published version.
    Latest,
    /// Uncommitted local work waiting to be published.
    Preview,
    /// Any other named checkout mode, passed through to the archive as is.
    Named(String),
    /// A read-only historical version.
    Historical(u64),
}

impl CheckoutMode {
    /// Maps a non-numeric qualifier onto a mode.
    pub fn from_name(name: &str) -> Self {
        match name {
            LATEST_QUALIFIER => CheckoutMode::Latest,
            PREVIEW_QUALIFIER => CheckoutMode::Preview,
            other => CheckoutMode::Named(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            CheckoutMode::Latest => LATEST_QUALIFIER.to_string(),
            CheckoutMode::Preview => PREVIEW_QUALIFIER.to_string(),
            CheckoutMode::Named(name) => name.clone(),
            CheckoutMode::Historical(version) => version.to_string(),
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, CheckoutMode::Latest)
    }
}

impl std::fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The checkout an editor session works on. Immutable for the session's
/// lifetime; opening another checkout means opening another session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    archive_ref: ArchiveRef,
    mode: CheckoutMode,
    is_historical: bool,
}

impl Checkout {
    pub fn new(archive_ref: ArchiveRef, mode: CheckoutMode) -> Self {
        let is_historical = matches!(mode, CheckoutMode::Historical(_));
        Self {
            archive_ref,
            mode,
            is_historical,
        }
    }

    pub fn archive_ref(&self) -> &ArchiveRef {
        &self.archive_ref
    }

    pub fn mode(&self) -> &CheckoutMode {
        &self.mode
    }

    pub fn is_historical(&self) -> bool {
        self.is_historical
    }

    pub fn version_label(&self) -> String {
        self.mode.label()
    }

    /// URL of the working checkout: the base URL for latest, otherwise the
    /// base URL qualified with the mode label.
    pub fn url(&self) -> String {
        match self.mode {
            CheckoutMode::Latest => self.archive_ref.base_url().to_string(),
            _ => self.archive_ref.with_qualifier(&self.mode.label()),
        }
    }
}
