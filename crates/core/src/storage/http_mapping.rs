//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Validation` -> 400 (Bad Request)
/// - `StorageUnavailable` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
///
/// Storage faults surface as a generic 500 rather than 503: the store
/// does not retry and leaves any retry policy to the caller.
///
/// # Examples
///
/// ```
/// use todovault_core::storage::{store_error_to_status_code, StoreError};
///
/// let error = StoreError::NotFound { id: "abc-123".to_string() };
/// assert_eq!(store_error_to_status_code(&error), 404);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::NotFound { .. } => 404,
        StoreError::Validation(_) => 400,
        StoreError::StorageUnavailable(_) => 500,
        StoreError::Serialization(_) => 500,
    }
}
