use crate::common::{latest, messages, open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn empty_change_set_skips_the_archive(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, mut notifications) = open_session(&site, "dat://X").await;

    session.commit_all().await.unwrap();
    session.revert_all().await.unwrap();

    assert!(latest(&site).await.sync_calls().await.is_empty());
    assert_eq!(
        messages(&mut notifications),
        vec!["Nothing to commit", "Nothing to revert"]
    );
}
