//! Error types for the content store

use std::path::PathBuf;

use thiserror::Error;

use super::document::CollectionId;

/// Errors raised by the content store and session
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("stored document {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no content store is open")]
    NotOpen,
    #[error("log in to change content")]
    NotAuthenticated,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("tawaf round must be between 1 and 7, got {0}")]
    InvalidRound(u8),
    #[error("record does not belong to the {0} collection")]
    RecordMismatch(CollectionId),
    #[error("the {0} collection cannot be edited")]
    ReadOnly(CollectionId),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
