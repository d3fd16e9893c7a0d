use crate::common::{INDEX_HTML, messages, open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::core::error::EditorError;
use archedit::commands::editor::events::UiEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn diff_view_is_read_only(#[future] site: MemoryArchiveService) {
    let (mut session, mut notifications) = open_session(&site.await, "dat://X").await;
    let id = session.buffers().active().unwrap().id();
    session.edit(id, "<h1>draft</h1>".to_string()).unwrap();

    session.dispatch(UiEvent::ToggleDiff).await.unwrap();
    let error = session
        .dispatch(UiEvent::Edit {
            buffer: id,
            content: "<h1>more</h1>".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(error, EditorError::ReadOnlyBuffer { .. }));
    let buffer = session.buffers().get(id).unwrap();
    let diff = buffer.diff().unwrap();
    assert_eq!(diff.left, INDEX_HTML);
    assert_eq!(diff.right, "<h1>draft</h1>");
    assert_eq!(
        messages(&mut notifications),
        vec!["/index.html is shown as a diff and cannot be edited"]
    );

    session.dispatch(UiEvent::ToggleDiff).await.unwrap();

    let buffer = session.buffers().get(id).unwrap();
    assert!(!buffer.in_diff());
    assert!(buffer.is_dirty());
    assert_eq!(buffer.content(), "<h1>draft</h1>");
}

#[rstest]
#[tokio::test]
async fn diff_on_latest_compares_against_preview(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X+latest").await;
    let id = session.create_file("/fresh.txt").await.unwrap();

    session.toggle_diff().await.unwrap();

    let diff = session.buffers().get(id).unwrap().diff().unwrap().clone();
    assert_eq!(diff.left, "");
    assert_eq!(diff.right, "");
}

#[rstest]
#[tokio::test]
async fn toggling_without_a_buffer_fails(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    session.close_all();

    let result = session.toggle_diff().await;

    assert!(matches!(result, Err(EditorError::NoActiveBuffer)));
}
