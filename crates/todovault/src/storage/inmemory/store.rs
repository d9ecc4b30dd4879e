//! In-memory blob store implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use todovault_core::storage::{BlobError, ObjectStore};

/// Process-local blob store for testing and local development.
///
/// Blobs live in a map behind a lock; nothing is persisted and the
/// content is lost when the store is dropped.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Writes a blob synchronously, bypassing the trait. Used by tests
    /// to seed or tamper with the durable document.
    #[cfg(test)]
    pub fn put_blocking(&self, key: &str, bytes: Vec<u8>) {
        self.blobs
            .write()
            .expect("Failed to acquire write lock")
            .insert(key.to_string(), bytes);
    }
}

#[async_trait]
impl ObjectStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.blobs
            .read()
            .map_err(|e| BlobError::Unavailable(e.to_string()))?
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                key: key.to_string(),
            })
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), BlobError> {
        self.blobs
            .write()
            .map_err(|e| BlobError::Unavailable(e.to_string()))?
            .insert(key.to_string(), bytes);
        Ok(())
    }
}
