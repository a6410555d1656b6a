//! DTOs for stats endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::UrlStats;

/// A stored mapping merged with its real-time view counter.
#[derive(Debug, Serialize)]
pub struct UrlStatsData {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    /// Durable counter maintained by the background view worker.
    pub views: i64,
    /// Approximate counter read from the cache; may run ahead of `views`.
    pub realtime_views: i64,
    pub last_viewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<UrlStats> for UrlStatsData {
    fn from(stats: UrlStats) -> Self {
        Self {
            id: stats.url.id,
            short_code: stats.url.short_code,
            long_url: stats.url.long_url,
            expires_at: stats.url.expires_at,
            views: stats.url.views,
            realtime_views: stats.realtime_views,
            last_viewed: stats.url.last_viewed,
            created_at: stats.url.created_at,
        }
    }
}
