//! Background worker that applies view counters off the redirect path.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::domain::view_event::ViewEvent;
use crate::infrastructure::cache::CacheService;

/// Consumes [`ViewEvent`]s and applies both counters for each one:
/// the durable `views` / `last_viewed` columns and the real-time
/// `analytics:<code>` counter in the cache.
///
/// Both updates are best-effort. A failure is logged and the event is
/// dropped; nothing is retried and nothing propagates back to the
/// redirect that produced the event. The loop ends when all senders
/// are dropped.
pub async fn run_view_worker(
    mut rx: mpsc::Receiver<ViewEvent>,
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
) {
    while let Some(event) = rx.recv().await {
        let code = event.short_code.as_str();

        if let Err(e) = urls.record_view(code).await {
            warn!("Failed to record view for {}: {}", code, e);
        }

        match cache.incr_views(code).await {
            Ok(count) => debug!("Realtime views for {}: {}", code, count),
            Err(e) => warn!("Failed to bump realtime counter for {}: {}", code, e),
        }
    }

    debug!("View worker shutting down");
}
