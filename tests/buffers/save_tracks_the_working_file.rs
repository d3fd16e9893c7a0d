use crate::common::{INDEX_HTML, latest, open_session, preview, read, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::diff::diff_entry::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn save_tracks_the_working_file(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, _notifications) = open_session(&site, "dat://X").await;
    let id = session.buffers().active().unwrap().id();
    session.edit(id, "<h1>saved</h1>".to_string()).unwrap();

    session.save_active().await.unwrap();

    let buffer = session.buffers().get(id).unwrap();
    assert!(!buffer.is_dirty());
    assert_eq!(buffer.saved_version(), Some(buffer.version()));
    assert_eq!(read(&preview(&site).await, "/index.html").await, "<h1>saved</h1>");
    assert_eq!(read(&latest(&site).await, "/index.html").await, INDEX_HTML);
    assert_eq!(
        session.tree().find("/index.html").unwrap().change(),
        Some(ChangeKind::Modified)
    );
}
