//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewSession, Session, session_payload};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for server-side sessions.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let now = Utc::now().timestamp();

        let session = sqlx::query_as(
            r#"
            INSERT INTO sessions (id, user_id, ip_address, user_agent, payload, last_activity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(new_session.user_id)
        .bind(&new_session.ip_address)
        .bind(&new_session.user_agent)
        .bind(session_payload(new_session.user_id, now))
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(session)
    }

    async fn touch(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET last_activity = $1 WHERE id = $2")
            .bind(Utc::now().timestamp())
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
