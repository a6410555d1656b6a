//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewSession, NewUser, Session, User, UserInfo, session_payload};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_with_session(
        &self,
        new_user: NewUser,
        session: NewSession,
    ) -> Result<(User, Session), AppError> {
        let mut tx = self.pool.begin().await?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        let now = Utc::now().timestamp();
        let session: Session = sqlx::query_as(
            r#"
            INSERT INTO sessions (id, user_id, ip_address, user_agent, payload, last_activity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user.id)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session_payload(user.id, now))
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, session))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_info(&self, id: i64) -> Result<Option<UserInfo>, AppError> {
        let info =
            sqlx::query_as("SELECT id, username, email, created_at FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(info)
    }

    async fn store_refresh_token(&self, user_id: i64, token_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_token_hash = $1, last_login = NOW() WHERE id = $2")
            .bind(token_hash)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
