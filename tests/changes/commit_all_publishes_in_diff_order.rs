use crate::common::{latest, messages, open_session, preview, read, site, write};
use archedit::areas::memory_archive::{MemoryArchiveService, SyncCall, SyncKind};
use archedit::artifacts::archive::backend::Archive;
use archedit::artifacts::diff::diff_entry::{ChangeKind, DiffEntry, EntryKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn commit_all_publishes_in_diff_order(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let preview = preview(&site).await;
    write(&preview, "/x", "x, edited").await;
    preview.unlink("/y").await.unwrap();

    let (mut session, mut notifications) = open_session(&site, "dat://X").await;
    assert_eq!(
        session.change_set().entries(),
        &[
            DiffEntry::new("/x".to_string(), ChangeKind::Modified, EntryKind::File),
            DiffEntry::new("/y".to_string(), ChangeKind::Deleted, EntryKind::File),
        ]
    );
    let id = session.open_file("/x").await.unwrap();
    session.toggle_diff().await.unwrap();
    assert_eq!(session.buffers().get(id).unwrap().diff().unwrap().left, "x");

    session.commit_all().await.unwrap();

    let latest = latest(&site).await;
    assert_eq!(
        latest.sync_calls().await,
        vec![SyncCall {
            kind: SyncKind::Publish,
            paths: vec!["/x".to_string(), "/y".to_string()],
        }]
    );
    assert!(!session.buffers().get(id).unwrap().in_diff());
    assert!(session.change_set().is_empty());
    assert_eq!(read(&latest, "/x").await, "x, edited");
    assert!(latest.read_file("/y").await.is_err());
    assert_eq!(messages(&mut notifications), vec!["Committed all changes"]);
}
