use crate::common::{latest, open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::archive::backend::UserSettings;
use archedit::artifacts::checkout::checkout::CheckoutMode;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(true, true, CheckoutMode::Preview)]
#[case(true, false, CheckoutMode::Latest)]
#[case(false, true, CheckoutMode::Latest)]
#[case(false, false, CheckoutMode::Latest)]
#[tokio::test]
async fn unqualified_reference_follows_user_settings(
    #[future] site: MemoryArchiveService,
    #[case] preview_mode: bool,
    #[case] is_saved: bool,
    #[case] expected: CheckoutMode,
) {
    let site = site.await;
    latest(&site)
        .await
        .set_user_settings(UserSettings {
            preview_mode,
            is_saved,
        })
        .await;

    let (session, _notifications) = open_session(&site, "dat://X").await;

    assert_eq!(session.checkout().mode(), &expected);
}

#[rstest]
#[tokio::test]
async fn trailing_plus_is_an_unqualified_reference(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X+").await;

    assert_eq!(session.checkout().mode(), &CheckoutMode::Preview);
    assert_eq!(session.checkout().archive_ref().version_qualifier(), None);
}
