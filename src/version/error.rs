use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl VersionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
