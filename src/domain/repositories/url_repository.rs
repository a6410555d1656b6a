//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new mapping only while the owner holds fewer than
    /// `max_per_user` URLs.
    ///
    /// Implementations must serialize the quota check and the insert per
    /// user so concurrent creates for the same user cannot exceed the cap.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` when the row was inserted
    /// - `Ok(None)` when the owner is at the quota
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists
    /// (callers retry with a fresh code). Returns [`AppError::Internal`]
    /// on database errors.
    async fn insert_within_quota(
        &self,
        new_url: NewShortUrl,
        max_per_user: i64,
    ) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a mapping by short code regardless of owner.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds a mapping by short code only if owned by `user_id`.
    ///
    /// Other users' codes are indistinguishable from absent ones.
    async fn find_owned(
        &self,
        short_code: &str,
        user_id: i64,
    ) -> Result<Option<ShortUrl>, AppError>;

    /// Lists all mappings owned by `user_id`, most recently created first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<ShortUrl>, AppError>;

    /// Increments the durable view counter and stamps `last_viewed`.
    ///
    /// Called by the background view worker, never on the redirect path.
    async fn record_view(&self, short_code: &str) -> Result<(), AppError>;
}
