//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check (public)
//! - `POST /auth/login`   - Login (public)
//! - `POST /auth/logout`  - Logout (Bearer token required)
//! - `GET  /user`         - Current user (Bearer token required)
//! - `/crud/*`            - Resource CRUD (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured origins
//! - **Rate limiting** - Per-IP token bucket, stricter on login
//! - **Authentication** - Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Router-level options taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Per-IP rate limiting. Requires the server to expose peer addresses
    /// via `ConnectInfo`.
    pub rate_limit: bool,
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
}

/// Constructs the routes with all middleware except path normalization.
pub fn api_router(state: AppState, options: &RouterOptions) -> Router {
    let mut protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let mut public = api::routes::public_routes();

    if options.rate_limit {
        protected = protected.layer(rate_limit::layer());
        public = public.layer(rate_limit::login_layer());
    }

    Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(cors::layer(&options.cors_origins))
        .layer(tracing::layer())
}

/// Constructs the application router.
///
/// Trailing slashes are trimmed before routing, so `/crud/pays/` and
/// `/crud/pays` reach the same handler.
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, options))
}
