use crate::common::{latest, open_session, read, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::diff::diff_entry::{ChangeKind, DiffEntry, EntryKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn added_folder_commits_as_directory_path(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let (mut session, _notifications) = open_session(&site, "dat://X").await;
    session.create_folder("/b").await.unwrap();
    let id = session.create_file("/b/c.txt").await.unwrap();
    session.edit(id, "see".to_string()).unwrap();
    session.save_active().await.unwrap();

    assert_eq!(
        session.change_set().entries(),
        &[DiffEntry::new(
            "/b".to_string(),
            ChangeKind::Added,
            EntryKind::Directory
        )]
    );
    assert_eq!(session.change_set().to_committable_paths(), vec!["/b/"]);
    assert_eq!(session.committable_path("/b"), "/b/");
    assert_eq!(session.committable_path("/b/c.txt"), "/b/c.txt");

    session.commit_path("/b").await.unwrap();

    let latest = latest(&site).await;
    assert_eq!(latest.sync_calls().await[0].paths, vec!["/b/"]);
    assert_eq!(read(&latest, "/b/c.txt").await, "see");
}
