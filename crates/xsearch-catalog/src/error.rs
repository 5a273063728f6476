//! Errors from catalog storage operations.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{path}: I/O error: {message}")]
    Io { path: PathBuf, message: String },

    #[error("{path}: parse error: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{0}: shard is not a JSON object of dataset records")]
    NotAMapping(PathBuf),

    #[error("corrupted shard: {0}")]
    Corrupt(String),

    #[error("invalid shard pattern: {0}")]
    InvalidPattern(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

impl From<CatalogError> for xsearch_core::SearchError {
    fn from(error: CatalogError) -> Self {
        xsearch_core::SearchError::Source(error.to_string())
    }
}
