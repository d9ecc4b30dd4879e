//! Object-store backend implementations.
//!
//! Concrete implementations of `todovault_core::storage::ObjectStore`,
//! selected at compile time via feature flags:
//!
//! - `inmemory` (default): process-local map, for tests and local dev
//! - `s3`: AWS S3 via `aws-sdk-s3`
//!
//! The features are mutually exclusive - only one backend can be
//! enabled at a time.

#[cfg(all(feature = "inmemory", feature = "s3"))]
compile_error!(
    "Features 'inmemory' and 's3' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "s3")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 's3' feature. \
    Example: cargo build -p todovault --features s3"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryBlobStore;

#[cfg(feature = "s3")]
pub use s3::S3BlobStore;
