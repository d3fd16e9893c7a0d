use std::time::Duration;
use tokio::sync::mpsc;

pub const SUCCESS_DURATION: Duration = Duration::from_secs(1);
pub const ERROR_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// An operation is taking a while; carries its label ("Saving...").
    Progress,
    Success,
    Error,
}

/// A transient message for the UI's toast area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// `None` keeps the toast until the next one replaces it.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn progress(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Progress,
            message: message.into(),
            duration: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration: Some(SUCCESS_DURATION),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration: Some(ERROR_DURATION),
        }
    }
}

/// Sending half of the notification channel.
///
/// Sending never fails from the caller's point of view: once the UI has
/// dropped its receiver, notifications are discarded.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::trace!("notification receiver dropped");
        }
    }
}
