//! S3 error mapping.
//!
//! Maps AWS SDK errors to `BlobError` from `todovault_core::storage`.

use std::fmt::Debug;

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;

use todovault_core::storage::BlobError;

/// Map a GetObject SDK error to BlobError.
///
/// A missing key is the one case the store treats as non-fatal, so it
/// gets its own variant; everything else is an availability fault.
pub fn map_get_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetObjectError, R>,
    key: impl Into<String>,
) -> BlobError {
    match err.into_service_error() {
        GetObjectError::NoSuchKey(_) => BlobError::NotFound { key: key.into() },
        err => BlobError::Unavailable(format!("GetObject failed: {err:?}")),
    }
}

/// Map a PutObject SDK error to BlobError.
pub fn map_put_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutObjectError, R>,
) -> BlobError {
    BlobError::Unavailable(format!("PutObject failed: {:?}", err.into_service_error()))
}
