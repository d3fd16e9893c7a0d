use crate::artifacts::archive::LATEST_QUALIFIER;
use crate::artifacts::archive::archive_ref::ArchiveRef;
use crate::artifacts::archive::backend::UserSettings;
use crate::artifacts::checkout::checkout::{Checkout, CheckoutMode};

/// Decides which checkout an archive reference opens.
///
/// Resolution order, first match wins:
///
/// 1. qualifier `latest`: the canonical latest checkout
/// 2. any other qualifier: a historical version when the qualifier is a
///    number (`+0`, `+3`, `+007`), otherwise the named mode it spells
///    (`+preview`, or anything else passed through as is)
/// 3. no qualifier, but the archive is in preview mode and has been saved:
///    the preview checkout
/// 4. the latest checkout
///
/// Resolution never fails: an unknown qualifier becomes a named mode.
pub struct CheckoutResolver;

impl CheckoutResolver {
    pub fn resolve(archive_ref: &ArchiveRef, settings: &UserSettings) -> Checkout {
        let mode = match archive_ref.version_qualifier() {
            Some(LATEST_QUALIFIER) => CheckoutMode::Latest,
            Some(qualifier) => match Self::parse_version(qualifier) {
                Some(version) => CheckoutMode::Historical(version),
                None => CheckoutMode::from_name(qualifier),
            },
            None if settings.preview_mode && settings.is_saved => CheckoutMode::Preview,
            None => CheckoutMode::Latest,
        };

        tracing::debug!(url = %archive_ref, mode = %mode, "resolved working checkout");
        Checkout::new(archive_ref.clone(), mode)
    }

    // "0" is version 0
    fn parse_version(qualifier: &str) -> Option<u64> {
        let trimmed = qualifier.trim_ascii();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        trimmed.parse().ok()
    }
}
