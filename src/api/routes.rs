//! API route configuration for the authenticated surface.
//!
//! Routes listed here require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{my_urls_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create a short URL
/// - `GET  /stats/{code}`  - Statistics for one owned short code
/// - `GET  /my-urls`       - Every short URL owned by the caller
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/my-urls", get(my_urls_handler))
}
