use std::path::PathBuf;

/// Errors raised while submitting, loading, or persisting journal entries.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Submitted text was empty or whitespace-only.
    #[error("journal entry is empty")]
    EmptyInput,

    /// The backing file exists but does not hold a valid journal.
    #[error("journal file {path} is corrupt: {reason}")]
    CorruptStore { path: PathBuf, reason: String },

    /// The backing file exists but could not be read.
    #[error("failed to read journal file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the backing file failed.
    #[error("failed to write journal file {path}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JournalError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        JournalError::CorruptStore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// I/O failures become `Unreadable`; anything else is a bad file.
    pub(crate) fn from_read(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        if !matches!(err.kind(), csv::ErrorKind::Io(_)) {
            return JournalError::corrupt(path, err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => JournalError::Unreadable {
                path: path.into(),
                source,
            },
            other => JournalError::corrupt(path, format!("{other:?}")),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JournalError::Persistence {
            path: path.into(),
            source,
        }
    }
}
