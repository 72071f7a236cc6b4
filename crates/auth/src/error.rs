//! Load-time error model.
//!
//! The resolver itself never fails; only reading a dependency table from an
//! external source can.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for dependency-table loading.
pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("failed to read dependency table from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not a JSON object of `name -> [name]`.
    #[error("malformed dependency table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A key or a required entry is the empty string.
    #[error("empty permission name in dependency table (entry '{0}')")]
    EmptyName(String),
}

impl TableError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
