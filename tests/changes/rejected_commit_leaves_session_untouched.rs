use crate::common::{drain, latest, open_session, preview, site, write};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::core::error::EditorError;
use archedit::artifacts::core::notification::NotificationLevel;
use archedit::commands::editor::events::UiEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn rejected_commit_leaves_session_untouched(#[future] site: MemoryArchiveService) {
    let site = site.await;
    write(&preview(&site).await, "/x", "x, edited").await;
    let (mut session, mut notifications) = open_session(&site, "dat://X").await;
    let id = session.open_file("/x").await.unwrap();
    session.toggle_diff().await.unwrap();
    let before = session.snapshot();

    let latest = latest(&site).await;
    latest.reject_next_sync("archive is busy").await;
    let versions = latest.version_count().await;

    let error = session.dispatch(UiEvent::CommitAll).await.unwrap_err();

    assert!(matches!(error, EditorError::Conflict { .. }));
    assert_eq!(latest.version_count().await, versions);
    assert_eq!(session.generation(), before.generation);
    assert_eq!(session.change_set().entries(), before.diff.as_slice());
    assert!(session.buffers().get(id).unwrap().in_diff());

    let notifications = drain(&mut notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(
        notifications[0].message,
        "change rejected by the archive: archive is busy"
    );
}
