use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing archive files.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// File system operation failed for the given path.
    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but its content is not the expected JSON document.
    #[error("malformed archive file '{}': {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded as JSON.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file involved in the failure, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } => Some(path.as_path()),
            Self::Serialization(_) => None,
        }
    }
}
