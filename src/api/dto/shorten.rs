//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreatedUrl;

/// Request body for `POST /shorten`.
///
/// Scheme checking happens in the URL service; here only shape is enforced.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Hours until expiry. Absent means the mapping never expires.
    #[validate(range(min = 1, max = 8760))]
    pub expires_in_hours: Option<u32>,
}

/// Payload returned for a freshly created short URL.
#[derive(Debug, Serialize)]
pub struct ShortUrlData {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedUrl> for ShortUrlData {
    fn from(created: CreatedUrl) -> Self {
        Self {
            id: created.url.id,
            short_code: created.url.short_code,
            short_url: created.short_url,
            long_url: created.url.long_url,
            expires_at: created.url.expires_at,
            created_at: created.url.created_at,
        }
    }
}
