use std::time::Duration;

/// How long an operation may run before a progress notification is shown.
pub const DEFAULT_PROGRESS_DELAY: Duration = Duration::from_millis(500);

/// File activated when a session opens, if the archive root has one.
pub const DEFAULT_FILE: &str = "index.html";

/// Knobs for an editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub progress_delay: Duration,
    pub default_file: String,
    /// Compare file contents, not just sizes, when diffing against latest.
    pub compare_content: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            progress_delay: DEFAULT_PROGRESS_DELAY,
            default_file: DEFAULT_FILE.to_string(),
            compare_content: true,
        }
    }
}
