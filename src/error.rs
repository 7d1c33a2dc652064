use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that escape the row normalizer and graph builder.
///
/// Per-line format problems never show up here; they are repaired or dropped
/// while reading.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("source file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("error processing file '{}': {source}", .path.display())]
    Processing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl GraphError {
    pub(crate) fn processing(path: &Path, source: io::Error) -> Self {
        Self::Processing {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this is the missing-source-file case
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
