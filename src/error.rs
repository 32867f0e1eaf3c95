use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving a persisted artifact.
///
/// A missing artifact is never an error; stores hand back the type's default
/// instead. Everything else (unreadable files, bad JSON, shapes that fail
/// validation) surfaces here and is fatal to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact content: {0}")]
    Invalid(String),

    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
