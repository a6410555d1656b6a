//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL mappings.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_within_quota(
        &self,
        new_url: NewShortUrl,
        max_per_user: i64,
    ) -> Result<Option<ShortUrl>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Under READ COMMITTED, two concurrent creates can each count the
        // same snapshot and both pass the quota check. Take a per-user
        // advisory lock for the transaction so creates for one user run
        // one at a time; the lock releases on commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(new_url.user_id)
            .execute(&mut *tx)
            .await?;

        let url = sqlx::query_as(
            r#"
            INSERT INTO short_urls (short_code, long_url, user_id, expires_at)
            SELECT $1, $2, $3, $4
            WHERE (SELECT COUNT(*) FROM short_urls WHERE user_id = $3) < $5
            RETURNING *
            "#,
        )
        .bind(&new_url.short_code)
        .bind(&new_url.long_url)
        .bind(new_url.user_id)
        .bind(new_url.expires_at)
        .bind(max_per_user)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(url)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as("SELECT * FROM short_urls WHERE short_code = $1")
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(url)
    }

    async fn find_owned(
        &self,
        short_code: &str,
        user_id: i64,
    ) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as("SELECT * FROM short_urls WHERE short_code = $1 AND user_id = $2")
            .bind(short_code)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(url)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<ShortUrl>, AppError> {
        let urls =
            sqlx::query_as("SELECT * FROM short_urls WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(urls)
    }

    async fn record_view(&self, short_code: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE short_urls SET views = views + 1, last_viewed = NOW() WHERE short_code = $1",
        )
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
