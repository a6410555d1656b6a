//! DTOs for the authentication endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::AuthSuccess;
use crate::domain::entities::UserInfo;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

/// Request body for `POST /register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /logout`.
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Payload returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserInfo,
    pub session_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthSuccess> for AuthData {
    fn from(success: AuthSuccess) -> Self {
        Self {
            user: success.user,
            session_id: success.session_id,
            access_token: success.tokens.access_token,
            refresh_token: success.tokens.refresh_token,
        }
    }
}
