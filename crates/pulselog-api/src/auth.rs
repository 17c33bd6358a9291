//! Request identity boundary.
//!
//! Session termination lives in the fronting layer, which forwards the
//! authenticated user as the `x-user-id` header. Requests without a usable
//! header are rejected before handler logic runs.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pulselog_core::Error;

use crate::error::ApiError;

/// Identity of the authenticated caller.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .map(AuthUser)
            .ok_or_else(|| ApiError(Error::Unauthorized("login required".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/workouts/list");
        if let Some(value) = header {
            builder = builder.header("x-user-id", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_valid_header_yields_user() {
        let mut parts = parts_with(Some("7"));
        let AuthUser(user_id) = AuthUser::from_request_parts(&mut parts, &())
            .await
            .expect("extraction succeeds");
        assert_eq!(user_id, 7);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let mut parts = parts_with(None);
        assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
    }

    #[tokio::test]
    async fn test_non_numeric_header_is_rejected() {
        let mut parts = parts_with(Some("alice"));
        assert!(AuthUser::from_request_parts(&mut parts, &()).await.is_err());
    }
}
