//! ShortUrl entity representing a short code to long URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// Becomes logically dead once `expires_at` passes; the row is never
/// physically deleted. `views` is the durable counter maintained by the
/// background view worker; the real-time counter lives in the cache.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub user_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub last_viewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Returns true if the mapping has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Remaining cache TTL in whole seconds, or `None` for mappings that
    /// never expire. Clamped to a minimum of 1 so a mapping expiring within
    /// the current second is not cached without a TTL.
    pub fn cache_ttl_seconds(&self) -> Option<u64> {
        self.expires_at
            .map(|e| (e - Utc::now()).num_seconds().max(1) as u64)
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub short_code: String,
    pub long_url: String,
    pub user_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
}
