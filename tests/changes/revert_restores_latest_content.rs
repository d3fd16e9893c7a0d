use crate::common::{INDEX_HTML, messages, open_session, preview, read, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn revert_restores_latest_content(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, mut notifications) = open_session(&site, "dat://X").await;
    let id = session.buffers().active().unwrap().id();
    session.edit(id, "<h1>draft</h1>".to_string()).unwrap();
    session.save_active().await.unwrap();
    session.toggle_diff().await.unwrap();

    session.revert_path("/index.html").await.unwrap();

    assert_eq!(read(&preview(&site).await, "/index.html").await, INDEX_HTML);
    let buffer = session.buffers().get(id).unwrap();
    assert_eq!(buffer.content(), INDEX_HTML);
    assert!(!buffer.is_dirty());
    assert!(!buffer.in_diff());
    assert!(session.change_set().is_empty());
    assert_eq!(messages(&mut notifications), vec!["Reverted /index.html"]);
}

#[rstest]
#[tokio::test]
async fn reverting_an_added_file_detaches_its_buffer(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    let id = session.create_file("/draft.md").await.unwrap();
    session.edit(id, "unsaved".to_string()).unwrap();

    session.revert_all().await.unwrap();

    let buffer = session.buffers().get(id).unwrap();
    assert!(buffer.is_detached());
    assert_eq!(buffer.content(), "unsaved");
    assert!(session.tree().find("/draft.md").is_none());
}
