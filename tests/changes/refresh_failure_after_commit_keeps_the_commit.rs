use crate::common::{drain, latest, open_session, preview, read, site, write};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::artifacts::core::notification::NotificationLevel;
use archedit::commands::editor::events::UiEvent;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn refresh_failure_after_commit_keeps_the_commit(#[future] site: MemoryArchiveService) {
    let site = site.await;
    write(&preview(&site).await, "/x", "x, edited").await;
    let (mut session, mut notifications) = open_session(&site, "dat://X").await;
    let id = session.open_file("/x").await.unwrap();
    session.toggle_diff().await.unwrap();
    drain(&mut notifications);

    let latest = latest(&site).await;
    let versions = latest.version_count().await;
    latest.fail_next_listing("disk unplugged").await;

    session.dispatch(UiEvent::CommitAll).await.unwrap();

    assert_eq!(latest.version_count().await, versions + 1);
    assert_eq!(read(&latest, "/x").await, "x, edited");
    assert!(!session.buffers().get(id).unwrap().in_diff());

    let notifications = drain(&mut notifications)
        .into_iter()
        .filter(|notification| notification.level != NotificationLevel::Progress)
        .map(|notification| (notification.level, notification.message))
        .collect::<Vec<_>>();
    assert_eq!(
        notifications,
        vec![
            (
                NotificationLevel::Error,
                "Unable to refresh the file tree: failed to access /: disk unplugged".to_string()
            ),
            (
                NotificationLevel::Success,
                "Committed all changes".to_string()
            ),
        ]
    );

    session.refresh().await.unwrap();
    assert!(!session.change_set().contains("/x"));
}
