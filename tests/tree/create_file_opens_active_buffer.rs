use crate::common::{open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::buffers::edit_buffer::EditBuffer;
use archedit::artifacts::diff::diff_entry::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn create_file_opens_active_buffer(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    session.create_folder("/docs").await.unwrap();

    let id = session.create_file("docs/readme.md").await.unwrap();

    let active = session.buffers().active().unwrap();
    assert_eq!(active.id(), id);
    assert_eq!(active.path(), "/docs/readme.md");
    assert_eq!(active.content(), "");
    assert!(!active.is_dirty());
    assert_eq!(
        session.tree().find("/docs/readme.md").and_then(|node| node.change()),
        Some(ChangeKind::Added)
    );
    assert_eq!(
        session
            .buffers()
            .buffers()
            .iter()
            .map(EditBuffer::path)
            .collect::<Vec<_>>(),
        vec!["/index.html", "/docs/readme.md"]
    );
}

#[rstest]
#[tokio::test]
async fn creating_inside_a_missing_folder_fails(#[future] site: MemoryArchiveService) {
    let (mut session, _notifications) = open_session(&site.await, "dat://X").await;
    let generation = session.generation();

    let result = session.create_file("/missing/readme.md").await;

    assert!(result.is_err());
    assert_eq!(session.generation(), generation);
    assert_eq!(session.buffers().len(), 1);
}
