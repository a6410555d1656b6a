//! Short URL creation, resolution, and stats merging.

use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::codegen::generate_code;

/// Hard cap on non-retired URLs per user.
const MAX_URLS_PER_USER: i64 = 10;

/// Attempts before giving up on finding an unused short code.
const MAX_CODE_ATTEMPTS: usize = 5;

/// A freshly created mapping plus its fully qualified short URL.
#[derive(Debug, Clone)]
pub struct CreatedUrl {
    pub url: ShortUrl,
    pub short_url: String,
}

/// A stored mapping merged with the real-time cache counter.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub url: ShortUrl,
    pub realtime_views: i64,
}

/// Service implementing the cache-then-store resolution path.
///
/// The cache accelerates the redirect hot path; the store stays
/// authoritative for expiry and durable counters. Cache entries always
/// carry a TTL derived from the store's `expires_at`, so a cached mapping
/// can never outlive its record's expiry.
pub struct UrlService {
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl UrlService {
    pub fn new(urls: Arc<dyn UrlRepository>, cache: Arc<dyn CacheService>, base_url: String) -> Self {
        Self {
            urls,
            cache,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short URL for `user_id`.
    ///
    /// The insert is quota-guarded at the store level; a code collision is
    /// retried with a fresh code up to [`MAX_CODE_ATTEMPTS`] times. On
    /// success the cache is populated with a TTL matching the remaining
    /// time to expiry (or none for permanent mappings); a cache failure is
    /// swallowed since the store write already succeeded.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for non-http(s) or malformed URLs
    /// - [`AppError::QuotaExceeded`] once the user owns [`MAX_URLS_PER_USER`] URLs
    pub async fn create(
        &self,
        user_id: i64,
        long_url: String,
        expires_in_hours: Option<u32>,
    ) -> Result<CreatedUrl, AppError> {
        validate_long_url(&long_url)?;

        let expires_at = expires_in_hours.map(|h| Utc::now() + Duration::hours(h as i64));

        for _ in 0..MAX_CODE_ATTEMPTS {
            let new_url = NewShortUrl {
                short_code: generate_code(),
                long_url: long_url.clone(),
                user_id,
                expires_at,
            };

            match self.urls.insert_within_quota(new_url, MAX_URLS_PER_USER).await {
                Ok(Some(url)) => {
                    if let Err(e) = self
                        .cache
                        .set_url(&url.short_code, &url.long_url, url.cache_ttl_seconds())
                        .await
                    {
                        error!("Failed to cache new URL {}: {}", url.short_code, e);
                    }

                    let short_url = format!("{}/s/{}", self.base_url, url.short_code);
                    return Ok(CreatedUrl { url, short_url });
                }
                Ok(None) => {
                    return Err(AppError::quota_exceeded(
                        format!("You have reached the limit of {MAX_URLS_PER_USER} urls"),
                        json!({ "limit": MAX_URLS_PER_USER, "upgrade": "https://example.com/upgrade" }),
                    ));
                }
                // Short code collision: try again with a fresh code.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its long URL.
    ///
    /// Cache-first: a hit is returned without consulting the store (its TTL
    /// was derived from the store's expiry when written). On a miss or
    /// cache error the store is authoritative: an absent record is NotFound,
    /// an expired one is Gone and does not repopulate the cache, and a live
    /// one repopulates the cache before returning.
    ///
    /// View counting is not done here; the redirect handler queues a
    /// [`crate::domain::view_event::ViewEvent`] after a successful resolve.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let cached = self
            .cache
            .get_url(short_code)
            .await
            .unwrap_or_else(|e| {
                // Cache unavailable: fail open to the store.
                error!("Cache error for {}: {}", short_code, e);
                None
            });

        if let Some(long_url) = cached {
            debug!("Cache HIT for {}", short_code);
            return Ok(long_url);
        }

        let url = self
            .urls
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": short_code })))?;

        if url.is_expired() {
            return Err(AppError::gone(
                "URL has expired",
                json!({ "code": short_code }),
            ));
        }

        if let Err(e) = self
            .cache
            .set_url(short_code, &url.long_url, url.cache_ttl_seconds())
            .await
        {
            error!("Failed to repopulate cache for {}: {}", short_code, e);
        }

        Ok(url.long_url)
    }

    /// Owner-only stats for one code, merged with the real-time counter.
    ///
    /// Codes owned by other users are reported as NotFound, never leaked.
    pub async fn stats(&self, user_id: i64, short_code: &str) -> Result<UrlStats, AppError> {
        let url = self
            .urls
            .find_owned(short_code, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": short_code })))?;

        let realtime_views = self.realtime_views(short_code).await;

        Ok(UrlStats {
            url,
            realtime_views,
        })
    }

    /// All URLs owned by `user_id`, newest first, each merged with the
    /// real-time counter.
    pub async fn list(&self, user_id: i64) -> Result<Vec<UrlStats>, AppError> {
        let urls = self.urls.list_for_user(user_id).await?;

        let mut stats = Vec::with_capacity(urls.len());
        for url in urls {
            let realtime_views = self.realtime_views(&url.short_code).await;
            stats.push(UrlStats {
                url,
                realtime_views,
            });
        }

        Ok(stats)
    }

    async fn realtime_views(&self, short_code: &str) -> i64 {
        self.cache.get_views(short_code).await.unwrap_or(0)
    }
}

fn validate_long_url(input: &str) -> Result<(), AppError> {
    let url = Url::parse(input)
        .map_err(|e| AppError::validation("Invalid URL", json!({ "reason": e.to_string() })))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::validation(
            "Only HTTP and HTTPS URLs can be shortened",
            json!({ "scheme": other }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{MockCacheService, NullCache};
    use mockall::predicate::eq;

    fn stored_url(code: &str, long_url: &str, expires_at: Option<chrono::DateTime<Utc>>) -> ShortUrl {
        ShortUrl {
            id: 1,
            short_code: code.to_string(),
            long_url: long_url.to_string(),
            user_id: 1,
            expires_at,
            views: 4,
            last_viewed: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_inserts_and_caches() {
        let mut urls = MockUrlRepository::new();
        urls.expect_insert_within_quota()
            .withf(|new, max| {
                new.short_code.len() == 8 && new.long_url == "https://example.com/" && *max == 10
            })
            .times(1)
            .returning(|new, _| {
                Ok(Some(stored_url(&new.short_code, &new.long_url, new.expires_at)))
            });

        let mut cache = MockCacheService::new();
        cache
            .expect_set_url()
            .withf(|_, long, ttl| long == "https://example.com/" && ttl.is_none())
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com/".to_string(),
        );

        let created = service
            .create(1, "https://example.com/".to_string(), None)
            .await
            .unwrap();

        assert_eq!(created.url.long_url, "https://example.com/");
        assert_eq!(
            created.short_url,
            format!("https://s.test.com/s/{}", created.url.short_code)
        );
    }

    #[tokio::test]
    async fn test_create_with_expiry_caches_with_ttl() {
        let mut urls = MockUrlRepository::new();
        urls.expect_insert_within_quota().returning(|new, _| {
            Ok(Some(stored_url(&new.short_code, &new.long_url, new.expires_at)))
        });

        let mut cache = MockCacheService::new();
        cache
            .expect_set_url()
            .withf(|_, _, ttl| {
                let ttl = ttl.expect("expiring mapping must be cached with a TTL");
                ttl > 3500 && ttl <= 3600
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let created = service
            .create(1, "https://example.com/".to_string(), Some(1))
            .await
            .unwrap();

        assert!(created.url.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_quota_exceeded_is_402() {
        let mut urls = MockUrlRepository::new();
        urls.expect_insert_within_quota()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(NullCache),
            "https://s.test.com".to_string(),
        );

        let err = service
            .create(1, "https://example.com/".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn test_create_retries_on_code_collision() {
        let mut urls = MockUrlRepository::new();
        let mut calls = 0;
        urls.expect_insert_within_quota()
            .times(2)
            .returning(move |new, _| {
                calls += 1;
                if calls == 1 {
                    Err(AppError::conflict("Unique constraint violation", json!({})))
                } else {
                    Ok(Some(stored_url(&new.short_code, &new.long_url, None)))
                }
            });

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(NullCache),
            "https://s.test.com".to_string(),
        );

        let created = service
            .create(1, "https://example.com/".to_string(), None)
            .await
            .unwrap();
        assert_eq!(created.url.short_code.len(), 8);
    }

    #[tokio::test]
    async fn test_create_rejects_non_http_scheme() {
        let mut urls = MockUrlRepository::new();
        urls.expect_insert_within_quota().times(0);

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(NullCache),
            "https://s.test.com".to_string(),
        );

        let err = service
            .create(1, "javascript:alert(1)".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_skips_store() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().times(0);

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .with(eq("abc123xy"))
            .times(1)
            .returning(|_| Ok(Some("https://example.com/".to_string())));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let long_url = service.resolve("abc123xy").await.unwrap();
        assert_eq!(long_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_miss_populates_cache() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(stored_url(code, "https://example.com/", None))));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(1).returning(|_| Ok(None));
        cache
            .expect_set_url()
            .withf(|code, long, ttl| {
                code == "abc123xy" && long == "https://example.com/" && ttl.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let long_url = service.resolve("abc123xy").await.unwrap();
        assert_eq!(long_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|_| Ok(None));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(NullCache),
            "https://s.test.com".to_string(),
        );

        let err = service.resolve("missing1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_is_gone_and_does_not_repopulate() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|code| {
            Ok(Some(stored_url(
                code,
                "https://example.com/",
                Some(Utc::now() - Duration::hours(1)),
            )))
        });

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache.expect_set_url().times(0);

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let err = service.resolve("expired1").await.unwrap_err();
        assert!(matches!(err, AppError::Gone { .. }));
    }

    #[tokio::test]
    async fn test_resolve_fails_open_on_cache_error() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(stored_url(code, "https://example.com/", None))));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| {
            Err(crate::infrastructure::cache::CacheError::Operation(
                "connection reset".to_string(),
            ))
        });
        cache.expect_set_url().returning(|_, _, _| Ok(()));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        assert_eq!(
            service.resolve("abc123xy").await.unwrap(),
            "https://example.com/"
        );
    }

    #[tokio::test]
    async fn test_stats_merges_realtime_counter() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_owned()
            .with(eq("abc123xy"), eq(1))
            .returning(|code, _| Ok(Some(stored_url(code, "https://example.com/", None))));

        let mut cache = MockCacheService::new();
        cache.expect_get_views().returning(|_| Ok(17));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let stats = service.stats(1, "abc123xy").await.unwrap();
        assert_eq!(stats.url.views, 4);
        assert_eq!(stats.realtime_views, 17);
    }

    #[tokio::test]
    async fn test_stats_foreign_code_is_not_found() {
        let mut urls = MockUrlRepository::new();
        // Owned lookup misses even though the code exists for another user.
        urls.expect_find_owned().returning(|_, _| Ok(None));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(NullCache),
            "https://s.test.com".to_string(),
        );

        let err = service.stats(2, "abc123xy").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_merged_per_code() {
        let mut urls = MockUrlRepository::new();
        urls.expect_list_for_user().returning(|_| {
            Ok(vec![
                stored_url("code0001", "https://a.example/", None),
                stored_url("code0002", "https://b.example/", None),
            ])
        });

        let mut cache = MockCacheService::new();
        cache
            .expect_get_views()
            .with(eq("code0001"))
            .returning(|_| Ok(3));
        cache
            .expect_get_views()
            .with(eq("code0002"))
            .returning(|_| Ok(0));

        let service = UrlService::new(
            Arc::new(urls),
            Arc::new(cache),
            "https://s.test.com".to_string(),
        );

        let list = service.list(1).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].realtime_views, 3);
        assert_eq!(list[1].realtime_views, 0);
    }
}
