use crate::common::{open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::archive::backend::Archive;
use archedit::artifacts::checkout::checkout::CheckoutMode;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn latest_qualifier_ignores_preview_settings(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X+latest").await;

    assert_eq!(session.checkout().mode(), &CheckoutMode::Latest);
    assert!(!session.checkout().is_historical());
    assert_eq!(session.working().url(), "dat://X");
}
