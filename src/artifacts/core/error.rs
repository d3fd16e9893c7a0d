use std::io;

/// Broad classification of an [`EditorError`], used when deciding how a
/// failure is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Conflict,
    NotFound,
    Usage,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("change rejected by the archive: {message}")]
    Conflict { message: String },
    #[error("{path} not found")]
    NotFound { path: String },
    #[error("no file is open")]
    NoActiveBuffer,
    #[error("{path} is shown as a diff and cannot be edited")]
    ReadOnlyBuffer { path: String },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl EditorError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn io_kind(path: impl Into<String>, kind: io::ErrorKind, message: &str) -> Self {
        Self::io(path, io::Error::new(kind, message.to_string()))
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        EditorError::NotFound { path: path.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        EditorError::Conflict {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::Io { .. } | EditorError::Store(_) => ErrorKind::Io,
            EditorError::Conflict { .. } => ErrorKind::Conflict,
            EditorError::NotFound { .. } => ErrorKind::NotFound,
            EditorError::NoActiveBuffer | EditorError::ReadOnlyBuffer { .. } => ErrorKind::Usage,
        }
    }
}
