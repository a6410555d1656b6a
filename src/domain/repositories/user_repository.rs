//! Repository trait for account data access.

use crate::domain::entities::{NewSession, NewUser, Session, User, UserInfo};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user and its initial session as a single transaction.
    ///
    /// Registration must never leave a user without a session or vice
    /// versa; either both rows exist afterwards or neither does.
    /// `session.user_id` is ignored and replaced by the freshly inserted id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_with_session(
        &self,
        new_user: NewUser,
        session: NewSession,
    ) -> Result<(User, Session), AppError>;

    /// Finds a user by email (unique).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Loads the restricted projection used by the auth gate.
    ///
    /// Never includes the password hash or refresh token digest.
    async fn find_info(&self, id: i64) -> Result<Option<UserInfo>, AppError>;

    /// Stores the digest of the currently valid refresh token and stamps
    /// `last_login`. Called as a side effect of token issuance.
    async fn store_refresh_token(&self, user_id: i64, token_hash: &str) -> Result<(), AppError>;
}
