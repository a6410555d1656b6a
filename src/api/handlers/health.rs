//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Reports service health.
///
/// # Endpoint
///
/// `GET /health` (public)
///
/// Checks the cache connection and the view event queue. A degraded cache
/// does not fail requests (reads fall back to the store), so the endpoint
/// reports it but still answers 200 only when everything is up.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cache = if state.cache.health_check().await {
        CheckStatus::ok("Cache reachable")
    } else {
        CheckStatus::degraded("Cache unreachable; reads fall back to the store")
    };

    let view_queue = if state.view_tx.is_closed() {
        CheckStatus::degraded("View worker stopped")
    } else {
        CheckStatus::ok(format!("Queue capacity: {}", state.view_tx.capacity()))
    };

    let healthy = cache.status == "ok" && view_queue.status == "ok";

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { cache, view_queue },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::test_state;
    use crate::domain::repositories::{
        MockSessionRepository, MockUrlRepository, MockUserRepository,
    };
    use crate::infrastructure::cache::MockCacheService;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use std::sync::Arc;

    fn server_with(
        cache: MockCacheService,
    ) -> (TestServer, tokio::sync::mpsc::Receiver<crate::domain::view_event::ViewEvent>) {
        let (state, rx) = test_state(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockUrlRepository::new()),
            Arc::new(cache),
        );

        let app = Router::new()
            .route("/health", get(health_handler))
            .with_state(state);

        (TestServer::new(app).unwrap(), rx)
    }

    #[tokio::test]
    async fn test_health_ok() {
        let mut cache = MockCacheService::new();
        cache.expect_health_check().returning(|| true);

        let (server, _rx) = server_with(cache);

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["checks"]["cache"]["status"], "ok");
        assert_eq!(body["checks"]["view_queue"]["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_degraded_cache_is_503() {
        let mut cache = MockCacheService::new();
        cache.expect_health_check().returning(|| false);

        let (server, _rx) = server_with(cache);

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), 503);
        let body: Value = response.json();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["cache"]["status"], "degraded");
    }

    #[tokio::test]
    async fn test_health_reports_stopped_view_worker() {
        let mut cache = MockCacheService::new();
        cache.expect_health_check().returning(|| true);

        let (server, rx) = server_with(cache);
        drop(rx);

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), 503);
        let body: Value = response.json();
        assert_eq!(body["checks"]["view_queue"]["status"], "degraded");
    }
}
