//! Error handling for the API gateway
//!
//! Every failure is rendered as `{"Error": "<message>"}`. Authorization
//! failures get 403; everything else, including unknown accounts and
//! unsupported methods, gets 400.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[serde(rename = "Error")]
    pub error: String,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body that is not valid JSON for the expected shape
    #[error("{0}")]
    BadRequest(String),

    /// Path id that is not a base-10 integer
    #[error("Invalid id given {0}")]
    InvalidId(String),

    #[error("Method not allowed {0}")]
    MethodNotAllowed(Method),

    /// Missing, invalid or mismatched token. The cause is deliberately not reported.
    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Common(#[from] common::error::Error),
}

impl ApiError {
    /// Status code this error is rendered with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        match &self {
            ApiError::InvalidToken => tracing::warn!("Permission denied [{}]", request_id),
            other => tracing::error!("API Error [{}]: {:?}", request_id, other),
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_bad_request() {
        let err = ApiError::from(common::Error::AccountNotFound(5));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "account 5 not found");
    }

    #[test]
    fn method_not_allowed_is_bad_request() {
        let err = ApiError::MethodNotAllowed(Method::GET);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Method not allowed GET");
    }

    #[test]
    fn invalid_token_is_forbidden() {
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::FORBIDDEN);
        let body = serde_json::to_string(&ErrorResponse { error: ApiError::InvalidToken.to_string() }).unwrap();
        assert_eq!(body, r#"{"Error":"Invalid token"}"#);
    }
}
