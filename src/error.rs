use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the word store and the app.
#[derive(Debug, Error)]
pub enum TimeMeError {
    /// The word list file could not be read or written.
    #[error("failed to {action} word list {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An operation was attempted in a state that cannot satisfy it,
    /// e.g. picking a word from an empty list.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl TimeMeError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action: "read",
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action: "write",
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TimeMeError>;
