use async_trait::async_trait;

use super::BlobError;

/// A key/value blob store holding the durable todo document.
///
/// The store treats the entire collection as one blob at a fixed key;
/// there is no per-item addressing, and `put` overwrites wholesale.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the blob at `key`.
    ///
    /// Fails with [`BlobError::NotFound`] when the key does not exist
    /// and [`BlobError::Unavailable`] for any other storage fault.
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError>;

    /// Overwrites the blob at `key` with `bytes`.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BlobError>;
}
