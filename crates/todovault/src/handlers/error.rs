use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use todovault_core::storage::{store_error_to_status_code, StoreError};

use crate::assist::AssistError;

/// Application error type that wraps `anyhow::Error`.
///
/// Allows using `?` on functions returning `Result<_, anyhow::Error>`
/// and maps the domain errors back to their HTTP status codes.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(store_error) = self.0.downcast_ref::<StoreError>() {
            let code = store_error_to_status_code(store_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if let Some(assist_error) = self.0.downcast_ref::<AssistError>() {
            match assist_error {
                AssistError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                AssistError::Parse(_) | AssistError::Upstream(_) => StatusCode::BAD_GATEWAY,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Application error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
