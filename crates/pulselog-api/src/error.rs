//! HTTP error mapping.
//!
//! Database failures are opaque to callers; validation and auth failures
//! carry a user-correctable message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use pulselog_core::Error;

/// Wrapper turning a core [`Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

/// Result alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Database(e) => {
                tracing::error!(subsystem = "api", error = %e, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            other => {
                tracing::error!(subsystem = "api", error = %other, "Unhandled failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let response =
            ApiError(Error::Validation("bad date".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response =
            ApiError(Error::Unauthorized("login required".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let response = ApiError(Error::Internal("pool exhausted".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
