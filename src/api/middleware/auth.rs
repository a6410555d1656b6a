//! Bearer token authentication middleware (the auth gate).

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::UserInfo;
use crate::domain::token::TokenKind;
use crate::{error::AppError, state::AppState};

/// Identity attached to the request after successful authentication.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserInfo,
    pub session_id: String,
}

/// Authenticates requests using a bearer access token.
///
/// # Authentication Flow
///
/// 1. Extract the token from the `Authorization` header
/// 2. Verify signature, expiry, discriminator, and live state via the
///    token service (this also refreshes session activity)
/// 3. Load the restricted user projection and session
/// 4. Attach [`CurrentUser`] as a request extension
///
/// # Errors
///
/// Returns a uniform `401 Unauthorized` if the header is missing or
/// malformed, the token fails verification for any reason, or the user or
/// session has vanished. Callers cannot tell which.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized())?;

    let payload = st
        .token_service
        .verify(&token, TokenKind::Access)
        .await
        .ok_or_else(AppError::unauthorized)?;

    let (user, session_id) = st
        .account_service
        .auth_context(&payload)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser { user, session_id });

    Ok(next.run(req).await)
}
