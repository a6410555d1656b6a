//! Repository trait for session lifecycle management.

use crate::domain::entities::{NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for server-side sessions.
///
/// Sessions are only ever addressed by their opaque id. Deleting a session
/// is the revocation mechanism: any token bound to a deleted session fails
/// verification from that point on.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Creates a session with a fresh opaque id and `last_activity` set to now.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Finds a session by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError>;

    /// Bumps `last_activity` to now.
    ///
    /// Invoked on every successful access-token verification, so session
    /// liveness extends with use.
    async fn touch(&self, id: &str) -> Result<(), AppError>;

    /// Deletes a session, revoking every token bound to it.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if the session
    /// did not exist.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
