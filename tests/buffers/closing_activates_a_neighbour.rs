use crate::common::{open_session, site};
use archedit::areas::memory_archive::{MemoryArchive, MemoryArchiveService};
use archedit::areas::session::EditorSession;
use archedit::artifacts::buffers::edit_buffer::EditBuffer;
use archedit::commands::editor::events::UiEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn open_paths(session: &EditorSession<MemoryArchive>) -> Vec<&str> {
    session.buffers().buffers().iter().map(EditBuffer::path).collect()
}

#[rstest]
#[tokio::test]
async fn closing_activates_a_neighbour(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    session.open_file("/css/main.css").await.unwrap();
    session.open_file("/x").await.unwrap();
    let middle = session.buffers().by_path("/css/main.css").unwrap().id();
    session.set_active(middle).unwrap();

    session.dispatch(UiEvent::CloseBuffer { buffer: middle }).await.unwrap();

    assert_eq!(open_paths(&session), vec!["/index.html", "/x"]);
    assert_eq!(session.buffers().active().map(EditBuffer::path), Some("/x"));
}

#[rstest]
#[tokio::test]
async fn reorder_and_close_others(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    session.open_file("/x").await.unwrap();
    let y = session.open_file("/y").await.unwrap();

    session
        .dispatch(UiEvent::ReorderBuffers { from: 2, to: 0 })
        .await
        .unwrap();
    assert_eq!(open_paths(&session), vec!["/y", "/index.html", "/x"]);

    session.dispatch(UiEvent::CloseOthers { keep: y }).await.unwrap();
    assert_eq!(open_paths(&session), vec!["/y"]);
    assert_eq!(session.buffers().active().map(EditBuffer::id), Some(y));
}
