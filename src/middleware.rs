//! Bearer token authentication for the `/api` routes.
//!
//! [`require_auth`] resolves the caller through the configured
//! [`IdentityVerifier`](crate::identity::IdentityVerifier) and stores an
//! [`AuthenticatedIdentity`] in the request extensions. Handlers receive it
//! through the `FromRequestParts` impl below.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState, utils};

/// Subject identifier of the caller, valid for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject: String,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("no identity in request context".into()))
    }
}

/// Rejects requests without a verified bearer token.
///
/// A request goes from unverified to verified exactly once; every failure is
/// final and answered with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header_value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    else {
        tracing::warn!("authentication failed: missing authorization header");
        return Err(AppError::Unauthenticated(
            "missing authorization header".into(),
        ));
    };

    let Some(token) = utils::bearer_token(header_value).map(str::to_string) else {
        tracing::warn!("authentication failed: empty bearer token");
        return Err(AppError::Unauthenticated("invalid token format".into()));
    };

    let subject = match state.verifier.verify(&token).await {
        Ok(subject) => subject,
        Err(e) => {
            tracing::warn!(reason = %e, "authentication failed: token rejected");
            return Err(AppError::Unauthenticated(format!("invalid token: {e}")));
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedIdentity { subject });
    Ok(next.run(request).await)
}
