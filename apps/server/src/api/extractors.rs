//! Custom Axum extractors for request bodies and path ids.

use crate::Error;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use medrec_schema::ValidationError;
use serde::de::DeserializeOwned;

/// JSON body extractor whose failures use the service's error shape.
///
/// Malformed JSON, missing fields and wrong JSON types are all reported as
/// validation errors (422) naming the offending field where serde tells us.
/// The `Content-Type` header is not checked.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Body read failures (including the size limit) keep axum's own status.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            Error::Validation(ValidationError::from_json_error(&e)).into_response()
        })
    }
}

/// Integer id taken from the single path parameter of a route.
///
/// Only an optional `-` followed by ASCII digits is accepted; anything else,
/// including a leading `+` or an out-of-range value, is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::BadRequest(e.body_text()))?;

        parse_id(&raw)
            .map(IdPath)
            .ok_or_else(|| Error::BadRequest(format!("Invalid id '{}': expected an integer", raw)))
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
