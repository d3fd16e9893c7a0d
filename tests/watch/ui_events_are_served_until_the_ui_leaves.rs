use crate::common::{messages, open_session, preview, read, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::buffers::edit_buffer::EditBuffer;
use archedit::commands::editor::events::UiEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tokio::sync::mpsc;

#[rstest]
#[tokio::test]
async fn ui_events_are_served_until_the_ui_leaves(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, mut notifications) = open_session(&site, "dat://X").await;

    let (events, receiver) = mpsc::unbounded_channel();
    events
        .send(UiEvent::CreateFile {
            path: "/todo.md".to_string(),
        })
        .unwrap();
    events.send(UiEvent::SaveActive).unwrap();
    events
        .send(UiEvent::DeletePath {
            path: "/x".to_string(),
            is_folder: false,
        })
        .unwrap();
    drop(events);

    session.run(receiver).await;

    assert_eq!(
        session.buffers().active().map(EditBuffer::path),
        Some("/todo.md")
    );
    assert_eq!(read(&preview(&site).await, "/todo.md").await, "");
    assert!(session.tree().find("/x").is_none());
    assert_eq!(messages(&mut notifications), vec!["Deleted /x"]);
}
