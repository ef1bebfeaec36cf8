use axum::http::Uri;

use crate::{error::AppError, middleware::AuthenticatedIdentity};

/// Answers unmatched `/api/` paths.
///
/// Mounted as a protected route so unknown paths are authenticated like
/// known ones: callers without a valid token get 401, not 404.
pub async fn not_found(uri: Uri, identity: AuthenticatedIdentity) -> AppError {
    tracing::debug!(caller = %identity.subject, path = %uri.path(), "no such api route");
    AppError::NotFound("Not Found".into())
}
