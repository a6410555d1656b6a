//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use auth::{login_handler, logout_handler, register_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::{my_urls_handler, stats_handler};

/// Shared helpers for handler tests: builds an [`crate::state::AppState`]
/// backed by the given repository/cache doubles.
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use crate::application::services::{AccountService, TokenService, TokenSettings, UrlService};
    use crate::domain::repositories::{SessionRepository, UrlRepository, UserRepository};
    use crate::domain::view_event::ViewEvent;
    use crate::infrastructure::cache::CacheService;
    use crate::state::AppState;

    pub const TEST_BASE_URL: &str = "https://s.test.com";

    pub fn test_token_settings() -> TokenSettings {
        TokenSettings {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        }
    }

    pub fn test_state(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
    ) -> (AppState, mpsc::Receiver<ViewEvent>) {
        let token_service = Arc::new(TokenService::new(
            test_token_settings(),
            users.clone(),
            sessions.clone(),
        ));
        let account_service = Arc::new(AccountService::new(
            users,
            sessions,
            token_service.clone(),
        ));
        let url_service = Arc::new(UrlService::new(
            urls,
            cache.clone(),
            TEST_BASE_URL.to_string(),
        ));

        let (view_tx, view_rx) = mpsc::channel(100);

        (
            AppState::new(account_service, url_service, token_service, cache, view_tx),
            view_rx,
        )
    }
}
