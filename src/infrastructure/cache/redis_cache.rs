//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

const URL_PREFIX: &str = "url:";
const ANALYTICS_PREFIX: &str = "analytics:";

/// Redis cache for fast URL lookups and real-time view counters.
///
/// Uses `ConnectionManager` for connection reuse. All operations are
/// fail-open: errors are logged, reads degrade to misses, and writes
/// report success so the redirect path is never blocked by the cache.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }

    fn url_key(short_code: &str) -> String {
        format!("{URL_PREFIX}{short_code}")
    }

    fn analytics_key(short_code: &str) -> String {
        format!("{ANALYTICS_PREFIX}{short_code}")
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let key = Self::url_key(short_code);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {}", short_code);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", short_code);
                Ok(None)
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", short_code, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = Self::url_key(short_code);
        let mut conn = self.client.clone();

        let result = match ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, long_url, ttl).await,
            None => conn.set::<_, _, ()>(&key, long_url).await,
        };

        match result {
            Ok(_) => {
                debug!("Cache SET: {} (TTL: {:?})", short_code, ttl_seconds);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", short_code, e);
                Ok(())
            }
        }
    }

    async fn incr_views(&self, short_code: &str) -> CacheResult<i64> {
        let key = Self::analytics_key(short_code);
        let mut conn = self.client.clone();

        conn.incr::<_, _, i64>(&key, 1)
            .await
            .map_err(|e| CacheError::Operation(format!("Redis INCR failed: {e}")))
    }

    async fn get_views(&self, short_code: &str) -> CacheResult<i64> {
        let key = Self::analytics_key(short_code);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0)),
            Err(e) => {
                warn!("Redis GET error for {}: {}", key, e);
                Ok(0)
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
