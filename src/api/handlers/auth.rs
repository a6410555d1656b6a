//! Handlers for account endpoints: register, login, logout.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::auth::{AuthData, LoginRequest, LogoutRequest, RegisterRequest};
use crate::api::dto::response::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account, opens a session, and returns a token pair.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Errors
///
/// Returns 422 if validation fails or the email is already taken.
pub async fn register_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let success = state
        .account_service
        .register(
            payload.username,
            payload.email,
            payload.password,
            Some(addr.ip().to_string()),
            user_agent(&headers),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User created successfully",
            AuthData::from(success),
        )),
    ))
}

/// Verifies credentials, opens a session, and returns a token pair.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 401 for an unknown email or wrong password; callers cannot
/// tell which.
pub async fn login_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let success = state
        .account_service
        .login(
            payload.email,
            payload.password,
            Some(addr.ip().to_string()),
            user_agent(&headers),
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthData::from(success),
    )))
}

/// Terminates the session named by a valid refresh token.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Access tokens bound to the session stop verifying immediately since the
/// session record is gone.
///
/// # Errors
///
/// Returns 401 if the refresh token fails verification.
pub async fn logout_handler(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    state.account_service.logout(&payload.refresh_token).await?;

    Ok(Json(ApiResponse::message_only("Logged out successfully")))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
