//! # API Module
//!
//! HTTP handlers of the locshare server.
//!
//! ## Endpoints
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, always `200 {"status":"healthy"}`. Mounted
//!   outside the auth middleware so health checks need no credentials.
//!
//! ### Locations (authenticated)
//!
//! - [`get_shared_locations`] - `GET /api/sharedlocations/{user_id}`, returns
//!   a JSON array of location records.
//! - [`update_user_location`] - `POST /api/locations`, appends one record and
//!   answers `201` with the stored object.
//!
//! - [`not_found`] - any other path under `/api/`, answered with `404` once
//!   the caller is authenticated.
//!
//! All three run behind
//! [`require_auth`](crate::middleware::require_auth) and receive the caller as
//! an [`AuthenticatedIdentity`](crate::middleware::AuthenticatedIdentity).
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::{get, post}};
//! use locshare::api::{get_shared_locations, health, update_user_location};
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .route("/api/sharedlocations/{user_id}", get(get_shared_locations))
//!     .route("/api/locations", post(update_user_location));
//! ```

mod fallback;
mod health;
mod locations;

pub use fallback::not_found;
pub use health::health;
pub use locations::{get_shared_locations, update_user_location};
