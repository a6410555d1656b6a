//! Handler for the short URL creation endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::api::dto::response::ApiResponse;
use crate::api::dto::shorten::{ShortUrlData, ShortenRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for the authenticated user.
///
/// # Endpoint
///
/// `POST /shorten` (requires bearer token)
///
/// # Errors
///
/// Returns 422 for a malformed or non-http(s) URL and 402 when the
/// per-user quota is exhausted.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = state
        .url_service
        .create(current.user.id, payload.url, payload.expires_in_hours)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Short URL created successfully",
            ShortUrlData::from(created),
        )),
    ))
}
