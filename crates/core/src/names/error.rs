//! Name cache error types.

use std::path::PathBuf;

use thiserror::Error;
use yoanoto_shared::AppError;

/// Name cache storage errors.
#[derive(Debug, Error)]
pub enum NameCacheError {
    /// Cache file could not be read or written.
    #[error("name cache I/O failed at {path}: {source}")]
    Io {
        /// Cache file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Cache could not be serialized.
    #[error("name cache serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl NameCacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "NAME_CACHE_IO",
            Self::Json(_) => "NAME_CACHE_JSON",
        }
    }
}

impl From<NameCacheError> for AppError {
    fn from(err: NameCacheError) -> Self {
        Self::Storage(err.to_string())
    }
}
