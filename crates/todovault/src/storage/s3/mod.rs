//! S3 storage backend implementation.
//!
//! Implements the `ObjectStore` trait over a single S3 bucket using
//! `aws-sdk-s3`.

mod error;
mod store;

pub use store::S3BlobStore;
