use crate::common::{latest, open_session, read, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::diff::diff_entry::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn commit_then_diff_is_clean(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, _notifications) = open_session(&site, "dat://X").await;
    let versions = latest(&site).await.version_count().await;

    let id = session.buffers().active().unwrap().id();
    session.edit(id, "<h1>edited</h1>".to_string()).unwrap();
    session.save_active().await.unwrap();
    assert_eq!(
        session.tree().find("/index.html").unwrap().change(),
        Some(ChangeKind::Modified)
    );

    session.commit_path("/index.html").await.unwrap();

    assert!(!session.change_set().contains("/index.html"));
    assert_eq!(session.tree().find("/index.html").unwrap().change(), None);
    let latest = latest(&site).await;
    assert_eq!(latest.version_count().await, versions + 1);
    assert_eq!(read(&latest, "/index.html").await, "<h1>edited</h1>");
}

#[rstest]
#[tokio::test]
async fn committing_one_path_leaves_the_others(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    session.create_file("/a.txt").await.unwrap();
    session.create_file("/b.txt").await.unwrap();

    session.commit_path("/a.txt").await.unwrap();

    let remaining = session.change_set().to_committable_paths();
    assert_eq!(remaining, vec!["/b.txt"]);
}
