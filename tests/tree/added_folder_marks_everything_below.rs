use crate::common::{open_session, preview, site, write};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::archive::backend::Archive;
use archedit::artifacts::diff::diff_entry::ChangeKind;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn added_folder_marks_everything_below(#[future] site: MemoryArchiveService) {
    let site = site.await;
    let preview = preview(&site).await;
    preview.mkdir("/docs").await.unwrap();
    preview.mkdir("/docs/guides").await.unwrap();
    write(&preview, "/docs/guides/intro.md", "# intro").await;

    let (session, _notifications) = open_session(&site, "dat://X").await;

    let committable = session.change_set().to_committable_paths();
    assert_eq!(committable, vec!["/docs/"]);
    for node_path in ["/docs", "/docs/guides", "/docs/guides/intro.md"] {
        let node = session.tree().find(node_path).unwrap();
        assert_eq!(node.change(), Some(ChangeKind::Added), "{node_path}");
    }
    assert_eq!(session.tree().find("/css").unwrap().change(), None);
}
