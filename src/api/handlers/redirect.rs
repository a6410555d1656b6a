//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::domain::view_event::ViewEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /s/{code}` (public)
///
/// # Request Flow
///
/// 1. Resolve the code through the cache, falling back to the store
/// 2. Send a view event to the background worker
/// 3. Return 307 Temporary Redirect
///
/// # View Tracking
///
/// View events go to a bounded channel for async processing. If the queue
/// is full, the view is dropped (fire-and-forget).
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code and 410 Gone for an expired
/// one.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.url_service.resolve(&code).await?;

    let _ = state.view_tx.try_send(ViewEvent::new(&code));

    Ok(Redirect::temporary(&long_url))
}
