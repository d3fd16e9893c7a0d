use crate::common::{messages, open_session, site};
use archedit::areas::memory_archive::MemoryArchiveService;
use archedit::areas::session::EditorSession;
use archedit::artifacts::core::config::SessionConfig;
use archedit::artifacts::core::notification::Notifier;
use archedit::artifacts::core::error::{EditorError, ErrorKind};
use archedit::commands::editor::events::UiEvent;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn historical_checkout_rejects_writes(#[future] site: MemoryArchiveService) {
    let (mut session, mut notifications) = open_session(&site.await, "dat://X+3").await;

    let error = session
        .dispatch(UiEvent::CreateFile {
            path: "/new.txt".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Io);
    assert!(matches!(
        &error,
        EditorError::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied
    ));
    assert!(session.tree().find("/new.txt").is_none());
    assert_eq!(messages(&mut notifications), vec![error.to_string()]);
}

#[rstest]
#[tokio::test]
async fn version_beyond_latest_is_not_found(#[future] site: MemoryArchiveService) {
    let (notifier, _notifications) = Notifier::channel();

    let result =
        EditorSession::open(&site.await, "dat://X+42", SessionConfig::default(), notifier).await;

    assert!(matches!(result, Err(EditorError::NotFound { .. })));
}
