use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError(pub xt_core::Error);

impl<E: Into<xt_core::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_public() {
            self.0.to_string()
        } else {
            error!("Internal error: {}", self.0);
            "Internal server error".to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use xt_core::Error;

    #[test]
    fn test_status_mapping() {
        let response = ApiError(Error::Validation("title is required".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError(Error::upstream(429, "quota")).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let response = ApiError(Error::Storage("disk".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_upstream_status_falls_back() {
        let response = ApiError(Error::upstream(42, "weird")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
