use thiserror::Error;

/// Errors returned by an [`crate::storage::ObjectStore`] backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobError {
    #[error("Blob not found: {key}")]
    NotFound { key: String },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during todo store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Todo not found: {id}")]
    NotFound { id: String },
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Invalid todo: {0}")]
    Validation(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for todo store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
