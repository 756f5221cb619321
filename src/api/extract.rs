//! Request extractors with uniform error responses.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// A required JSON request body.
///
/// Unlike [`axum::Json`], the `Content-Type` header is not checked, and every
/// failure is an [`AppError::BadRequest`]:
///
/// - empty body or a literal `null` → "Request body is required"
/// - syntactically invalid JSON or a shape mismatch → "Malformed request body"
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::bad_request("Failed to read request body", json!({ "reason": e.body_text() }))
        })?;

        parse_json_body(&bytes).map(JsonBody)
    }
}

fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let missing = || AppError::bad_request("Request body is required", json!({}));

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(missing());
    }

    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        AppError::bad_request("Malformed request body", json!({ "reason": e.to_string() }))
    })?;

    if value.is_null() {
        return Err(missing());
    }

    serde_json::from_value(value).map_err(|e| {
        AppError::bad_request("Malformed request body", json!({ "reason": e.to_string() }))
    })
}

/// Parses a `{id}` path segment.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if the segment is not a UUID.
pub fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::bad_request("Invalid user id", json!({ "id": raw })))
}
