use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    extractors::LenientJson,
    middleware::AuthenticatedIdentity,
    state::AppState,
    types::{ListScope, LocationRecord},
};

/// Lists shared locations.
///
/// With the default [`ListScope::All`] the `user_id` path segment is accepted
/// but not used and the whole store is returned. [`ListScope::Subject`]
/// narrows the result to that user's records.
pub async fn get_shared_locations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    identity: AuthenticatedIdentity,
) -> Json<Vec<LocationRecord>> {
    let records = match state.list_scope {
        ListScope::All => state.store.list().await,
        ListScope::Subject => state.store.list_for(&user_id).await,
    };

    tracing::debug!(
        caller = %identity.subject,
        requested = %user_id,
        count = records.len(),
        "listing shared locations"
    );
    Json(records)
}

/// Stores a new location sample.
///
/// An empty body stores a zero record. Any other body that does not decode
/// into a [`LocationRecord`] is answered with 400
/// `{"message":"Invalid input"}`.
pub async fn update_user_location(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    LenientJson(record): LenientJson<LocationRecord>,
) -> (StatusCode, Json<LocationRecord>) {
    // Writing on behalf of another user is allowed.
    if record.user_id != identity.subject {
        tracing::warn!(
            caller = %identity.subject,
            user_id = %record.user_id,
            "location written for a different user"
        );
    }

    let stored = state.store.append(record).await;
    tracing::info!(
        user_id = %stored.user_id,
        latitude = stored.latitude,
        longitude = stored.longitude,
        "location appended"
    );

    (StatusCode::CREATED, Json(stored))
}
