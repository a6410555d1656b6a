//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AccountService, TokenService, UrlService};
use crate::domain::view_event::ViewEvent;
use crate::infrastructure::cache::CacheService;

/// Application state shared across all request handlers.
///
/// Cloning is cheap: everything inside is an `Arc` or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub url_service: Arc<UrlService>,
    pub token_service: Arc<TokenService>,
    pub cache: Arc<dyn CacheService>,
    pub view_tx: mpsc::Sender<ViewEvent>,
}

impl AppState {
    pub fn new(
        account_service: Arc<AccountService>,
        url_service: Arc<UrlService>,
        token_service: Arc<TokenService>,
        cache: Arc<dyn CacheService>,
        view_tx: mpsc::Sender<ViewEvent>,
    ) -> Self {
        Self {
            account_service,
            url_service,
            token_service,
            cache,
            view_tx,
        }
    }
}
