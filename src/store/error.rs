//! Task store error types

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::{TaskId, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid task: {0}")]
    Validation(#[from] ValidationError),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Failed to write task record {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode task record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to read task record {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Task record {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn persistence(path: &Path, source: std::io::Error) -> Self {
        StoreError::Persistence {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for failures writing the record, as opposed to bad input.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence { .. } | StoreError::Encode(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
