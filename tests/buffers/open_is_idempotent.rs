use crate::common::{open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn open_is_idempotent(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    let first = session.open_file("/css/main.css").await.unwrap();
    session.edit(first, "body { color: red }".to_string()).unwrap();
    session.open_file("/index.html").await.unwrap();

    let second = session.open_file("css/main.css").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(session.buffers().len(), 2);
    let buffer = session.buffers().active().unwrap();
    assert_eq!(buffer.id(), first);
    assert!(buffer.is_dirty());
    assert_eq!(buffer.content(), "body { color: red }");
}

#[rstest]
#[tokio::test]
async fn opening_a_missing_file_fails(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;

    let result = session.open_file("/nope.html").await;

    assert!(result.is_err());
    assert_eq!(session.buffers().len(), 1);
}
