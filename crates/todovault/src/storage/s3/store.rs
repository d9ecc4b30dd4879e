//! S3 blob store implementation.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use todovault_core::storage::{BlobError, ObjectStore};

use super::error::{map_get_object_error, map_put_object_error};

/// S3-backed blob store holding the durable todo document.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Creates a new store with the given S3 client and bucket.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential and region chain.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), bucket)
    }
}

#[async_trait]
impl ObjectStore for S3BlobStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_get_object_error(e, key))?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| BlobError::Unavailable(format!("Reading object body failed: {e}")))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(map_put_object_error)?;

        Ok(())
    }
}
