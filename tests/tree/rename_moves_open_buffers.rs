use crate::common::{open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn rename_moves_open_buffers(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    let id = session.open_file("/css/main.css").await.unwrap();
    session.edit(id, "body { margin: 0 }".to_string()).unwrap();

    session.rename_path("/css", "/styles").await.unwrap();

    let buffer = session.buffers().get(id).unwrap();
    assert_eq!(buffer.path(), "/styles/main.css");
    assert!(!buffer.is_detached());
    assert!(buffer.is_dirty());
    assert_eq!(buffer.content(), "body { margin: 0 }");
    assert!(session.tree().find("/css").is_none());
    assert!(session.tree().find("/styles/main.css").is_some());
    assert!(session.buffers().by_path("/css/main.css").is_none());
}
