#![allow(dead_code)]

use archedit::areas::memory_archive::{MemoryArchive, MemoryArchiveService};
use archedit::areas::session::EditorSession;
use archedit::artifacts::archive::backend::{Archive, ArchiveService, UserSettings};
use archedit::artifacts::checkout::checkout::CheckoutMode;
use archedit::artifacts::core::config::SessionConfig;
use archedit::artifacts::core::notification::{Notification, Notifier};
use bytes::Bytes;
use rstest::fixture;
use tokio::sync::mpsc;

pub const SITE_URL: &str = "dat://X";
pub const INDEX_HTML: &str = "<h1>hello</h1>";
pub const MAIN_CSS: &str = "body {}";

pub type Notifications = mpsc::UnboundedReceiver<Notification>;

/// Latest holds five versions after the empty one:
///
/// ```text
/// 1  /index.html
/// 2  /css
/// 3  /css/main.css
/// 4  /x
/// 5  /y
/// ```
///
/// Preview mode is on, so the preview starts out equal to latest.
#[fixture]
pub async fn site() -> MemoryArchiveService {
    let service = MemoryArchiveService::new();
    let archive = service.create(SITE_URL, Some("site")).await;

    write(&archive, "/index.html", INDEX_HTML).await;
    archive.mkdir("/css").await.expect("Failed to create /css");
    write(&archive, "/css/main.css", MAIN_CSS).await;
    write(&archive, "/x", "x").await;
    write(&archive, "/y", "y").await;

    archive
        .set_user_settings(UserSettings {
            preview_mode: true,
            is_saved: true,
        })
        .await;

    service
}

pub async fn open_session(
    service: &MemoryArchiveService,
    url: &str,
) -> (EditorSession<MemoryArchive>, Notifications) {
    let (notifier, notifications) = Notifier::channel();
    let session = EditorSession::open(service, url, SessionConfig::default(), notifier)
        .await
        .expect("Failed to open session");

    (session, notifications)
}

pub async fn latest(service: &MemoryArchiveService) -> MemoryArchive {
    service
        .open(SITE_URL)
        .await
        .expect("Failed to open archive")
}

pub async fn preview(service: &MemoryArchiveService) -> MemoryArchive {
    latest(service).await.checkout(&CheckoutMode::Preview)
}

pub async fn write(archive: &MemoryArchive, path: &str, content: &str) {
    archive
        .write_file(path, Bytes::from(content.to_string()))
        .await
        .unwrap_or_else(|error| panic!("Failed to write {path}: {error}"));
}

pub async fn read(archive: &MemoryArchive, path: &str) -> String {
    archive
        .read_text(path)
        .await
        .unwrap_or_else(|error| panic!("Failed to read {path}: {error}"))
}

pub fn drain(notifications: &mut Notifications) -> Vec<Notification> {
    let mut drained = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        drained.push(notification);
    }
    drained
}

pub fn messages(notifications: &mut Notifications) -> Vec<String> {
    drain(notifications)
        .into_iter()
        .map(|notification| notification.message)
        .collect()
}
