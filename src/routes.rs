//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /register`      - Create an account, open a session (public)
//! - `POST /login`         - Verify credentials, open a session (public)
//! - `POST /logout`        - Terminate the session named by a refresh token (public)
//! - `GET  /s/{code}`      - Short URL redirect (public)
//! - `GET  /health`        - Health check: cache, view queue (public)
//! - `POST /shorten`       - Create a short URL (Bearer token required)
//! - `GET  /stats/{code}`  - Per-code statistics (Bearer token required)
//! - `GET  /my-urls`       - Caller's short URLs (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer access token on the protected surface
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, login_handler, logout_handler, redirect_handler, register_handler,
};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/s/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(protected)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
