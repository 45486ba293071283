//! API handlers
//!
//! Handlers extract state, path and body with axum extractors, call the
//! account service and return the resource as JSON with status 200. Every
//! failure flows through [`ApiError`](crate::error::ApiError).

pub mod account;
pub mod transfer;

use axum::http::Method;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Parse the `{id}` path segment as a base-10 integer
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Decode a JSON request body
///
/// The content type is not checked; only the bytes have to be valid JSON.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Fallback for methods a path does not route
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
