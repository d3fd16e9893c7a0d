use crate::common::{open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::diff::diff_entry::{ChangeKind, DiffEntry, EntryKind};
use archedit::artifacts::diff::tracker::DiffTracker;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn modified_folder_does_not_mark_children(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X").await;
    let mut root = session.tree().root().clone();

    DiffTracker::annotate(
        &mut root,
        &[DiffEntry::new(
            "/css".to_string(),
            ChangeKind::Modified,
            EntryKind::Directory,
        )],
    );

    let css = root.child("css").unwrap();
    assert_eq!(css.change(), Some(ChangeKind::Modified));
    assert_eq!(css.child("main.css").unwrap().change(), None);
    assert_eq!(root.change(), None);
}

#[rstest]
#[tokio::test]
async fn own_entry_wins_below_a_modified_folder(#[future] site: MemoryArchiveService) {
    let (session, _notifications) = open_session(&site.await, "dat://X").await;
    let mut root = session.tree().root().clone();

    DiffTracker::annotate(
        &mut root,
        &[
            DiffEntry::new("/css".to_string(), ChangeKind::Modified, EntryKind::Directory),
            DiffEntry::new(
                "/css/main.css".to_string(),
                ChangeKind::Deleted,
                EntryKind::File,
            ),
        ],
    );

    let main_css = root.child("css").and_then(|css| css.child("main.css")).unwrap();
    assert_eq!(main_css.change(), Some(ChangeKind::Deleted));
}
