//! # Request Body Extraction
//!
//! [`LenientJson`] decodes JSON request bodies the way location clients
//! expect: an empty body stands for the default value, anything else must
//! be JSON with a JSON content type.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Body shown to callers for every undecodable payload.
const INVALID_INPUT: &str = "Invalid input";

/// JSON body extractor that treats a zero-length body as `T::default()`.
///
/// Rejections are [`AppError::BadRequest`] with the fixed message
/// `Invalid input`; the decoder's reason is only logged.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(LenientJson(record): LenientJson<LocationRecord>) { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection, "cannot read request body");
            invalid_input()
        })?;

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        if !json_content {
            tracing::debug!("request body without a JSON content type");
            return Err(invalid_input());
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|rejection| {
            tracing::debug!(reason = %rejection, "rejected JSON payload");
            invalid_input()
        })?;

        Ok(Self(value))
    }
}

fn invalid_input() -> AppError {
    AppError::BadRequest(INVALID_INPUT.into())
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };

    kind.eq_ignore_ascii_case("application")
        && (subtype.eq_ignore_ascii_case("json")
            || subtype.to_ascii_lowercase().ends_with("+json"))
}
