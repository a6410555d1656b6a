//! Registration, login, and logout flows plus the auth-gate context loader.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::TokenService;
use crate::domain::entities::{NewSession, NewUser, UserInfo};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::domain::token::{TokenKind, TokenPair, TokenPayload};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Result of a successful register or login.
#[derive(Debug)]
pub struct AuthSuccess {
    pub user: UserInfo,
    pub session_id: String,
    pub tokens: TokenPair,
}

/// Service orchestrating account lifecycle and session management.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    tokens: Arc<TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }

    /// Registers a new account and opens its first session.
    ///
    /// User and session are created in one transaction: either both exist
    /// afterwards or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AuthSuccess, AppError> {
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::validation(
                "User already exists",
                json!({ "email": email }),
            ));
        }

        let new_user = NewUser {
            username,
            email,
            password_hash: hash_password(&password)?,
        };

        let (user, session) = self
            .users
            .create_with_session(
                new_user,
                NewSession {
                    user_id: 0, // replaced by the inserted user's id
                    ip_address,
                    user_agent,
                },
            )
            .await?;

        let tokens = self.tokens.issue(&user, &session.id).await?;

        Ok(AuthSuccess {
            user: user.to_info(),
            session_id: session.id,
            tokens,
        })
    }

    /// Verifies credentials and opens a fresh session.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(
        &self,
        email: String,
        password: String,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<AuthSuccess, AppError> {
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(AppError::unauthorized)?;

        if !verify_password(&password, &user.password_hash) {
            return Err(AppError::unauthorized());
        }

        let session = self
            .sessions
            .create(NewSession {
                user_id: user.id,
                ip_address,
                user_agent,
            })
            .await?;

        let tokens = self.tokens.issue(&user, &session.id).await?;

        Ok(AuthSuccess {
            user: user.to_info(),
            session_id: session.id,
            tokens,
        })
    }

    /// Revokes the session a refresh token is bound to.
    ///
    /// After this call, every token bound to that session fails
    /// verification. Deleting an already-deleted session is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the refresh token does not verify.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let payload = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .await
            .ok_or_else(AppError::unauthorized)?;

        self.sessions.delete(&payload.sid).await?;

        Ok(())
    }

    /// Loads the restricted user projection and session for a verified
    /// payload. `None` when either has vanished since verification.
    pub async fn auth_context(
        &self,
        payload: &TokenPayload,
    ) -> Result<Option<(UserInfo, String)>, AppError> {
        let Some(user) = self.users.find_info(payload.sub).await? else {
            return Ok(None);
        };
        let Some(session) = self.sessions.find_by_id(&payload.sid).await? else {
            return Ok(None);
        };

        Ok(Some((user, session.id)))
    }
}
