use std::{net::SocketAddr, str::FromStr};

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware::from_fn_with_state,
    routing::{any, get, post},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api, error, info, middleware, state::AppState, success};

const ALLOWED_HEADERS: [HeaderName; 4] = [
    header::ORIGIN,
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::AUTHORIZATION,
];

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Builds the application router.
///
/// `/health` is public; everything under `/api/`, including paths no handler
/// serves, passes through [`middleware::require_auth`] first.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/api/sharedlocations/{user_id}",
            get(api::get_shared_locations),
        )
        .route("/api/locations", post(api::update_user_location))
        .route("/api/{*rest}", any(api::not_found))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let app = Router::new()
        .route("/health", get(api::health))
        .merge(protected)
        .with_state(state);

    with_middleware(app)
}

/// Wraps `app` in the layers shared by every route: panic recovery, request
/// tracing and CORS (outermost, so preflight requests never reach auth).
pub fn with_middleware(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(ALLOWED_HEADERS)
        .allow_methods(ALLOWED_METHODS);

    app.layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Binds `addr` and serves the router until Ctrl-C or SIGTERM.
///
/// An unparsable address or a failed bind terminates the process.
pub async fn start_api_server(state: AppState, addr: &str) {
    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address '{}': {}", addr, e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    success!("Listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }

    info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
