//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the fast cache used on the redirect path.
///
/// Covers two concerns: the `url:<code>` redirect accelerator (with per-key
/// TTL derived from the store's expiry) and the `analytics:<code>` real-time
/// view counter (no TTL, accumulates indefinitely).
///
/// Implementations must be thread-safe and degrade gracefully: the resolver
/// falls back to the database when the cache misbehaves, so read/write
/// failures are logged and treated as misses rather than surfaced.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short code.
    ///
    /// Returns `Ok(Some(url))` on hit, `Ok(None)` on miss or error
    /// (fail-open behavior).
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a URL mapping with an optional TTL in seconds.
    ///
    /// `None` means the mapping never expires and is stored without a TTL.
    /// Implementations log errors and return `Ok(())` so a cache outage
    /// never disrupts the request flow.
    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Increments the real-time view counter for a code and returns the new value.
    async fn incr_views(&self, short_code: &str) -> CacheResult<i64>;

    /// Reads the real-time view counter, defaulting to 0 when the key is
    /// absent or unparseable.
    async fn get_views(&self, short_code: &str) -> CacheResult<i64>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
