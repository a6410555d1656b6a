//! User entity and its sanitized projection.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account.
///
/// `token_version` exists to mass-invalidate issued tokens: every token embeds
/// the version current at issuance time, and verification rejects tokens whose
/// embedded version no longer matches. `refresh_token_hash` holds the SHA-256
/// digest of the most recently issued refresh token, making the store the
/// source of truth for "the currently valid refresh token".
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub token_version: i32,
    pub refresh_token_hash: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Strips credentials for use in API responses and request context.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Restricted user projection without password hash or refresh token digest.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
