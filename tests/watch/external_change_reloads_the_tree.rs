use crate::common::{open_session, preview, site, write};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::diff::diff_entry::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::time::Duration;
use tokio::sync::mpsc;

#[rstest]
#[tokio::test]
async fn external_change_reloads_the_tree(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, _notifications) = open_session(&site, "dat://X").await;
    let id = session.buffers().active().unwrap().id();
    session.edit(id, "<h1>unsaved</h1>".to_string()).unwrap();
    let generation = session.generation();

    let (events, receiver) = mpsc::unbounded_channel();
    let external = preview(&site).await;
    let outside_edit = async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        write(&external, "/notes.txt", "from elsewhere").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(events);
    };

    tokio::join!(session.run(receiver), outside_edit);

    assert!(session.generation() > generation);
    assert_eq!(
        session.tree().find("/notes.txt").and_then(|node| node.change()),
        Some(ChangeKind::Added)
    );
    let buffer = session.buffers().get(id).unwrap();
    assert_eq!(buffer.content(), "<h1>unsaved</h1>");
    assert!(buffer.is_dirty());
    assert!(!buffer.is_detached());
}
