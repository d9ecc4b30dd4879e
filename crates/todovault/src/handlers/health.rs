//! Health check endpoint.

use axum::http::StatusCode;

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting
/// connections; does NOT touch the store.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}
