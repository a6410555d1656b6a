//! Handlers for URL statistics endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::response::ApiResponse;
use crate::api::dto::stats::UrlStatsData;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns stats for one short code owned by the authenticated user.
///
/// # Endpoint
///
/// `GET /stats/{code}` (requires bearer token)
///
/// # Errors
///
/// Returns 404 if the code does not exist or belongs to another user;
/// callers cannot tell which.
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<UrlStatsData>>, AppError> {
    let stats = state.url_service.stats(current.user.id, &code).await?;

    Ok(Json(ApiResponse::ok(
        "Url stats fetched successfully",
        UrlStatsData::from(stats),
    )))
}

/// Lists every short URL owned by the authenticated user, with stats.
///
/// # Endpoint
///
/// `GET /my-urls` (requires bearer token)
pub async fn my_urls_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<UrlStatsData>>>, AppError> {
    let stats = state.url_service.list(current.user.id).await?;

    Ok(Json(ApiResponse::ok(
        "Urls fetched successfully",
        stats.into_iter().map(UrlStatsData::from).collect(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::test_state;
    use crate::domain::entities::{ShortUrl, UserInfo};
    use crate::domain::repositories::{
        MockSessionRepository, MockUrlRepository, MockUserRepository,
    };
    use crate::infrastructure::cache::MockCacheService;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::Value;
    use std::sync::Arc;

    fn stored_url(code: &str, user_id: i64, views: i64) -> ShortUrl {
        ShortUrl {
            id: 10,
            short_code: code.to_string(),
            long_url: "https://example.com/page".to_string(),
            user_id,
            expires_at: None,
            views,
            last_viewed: None,
            created_at: Utc::now(),
        }
    }

    fn server_with(urls: MockUrlRepository, cache: MockCacheService) -> TestServer {
        let (state, _rx) = test_state(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            Arc::new(urls),
            Arc::new(cache),
        );

        let current = CurrentUser {
            user: UserInfo {
                id: 9,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                created_at: Utc::now(),
            },
            session_id: "sess-9".to_string(),
        };

        let app = Router::new()
            .route("/stats/{code}", get(stats_handler))
            .route("/my-urls", get(my_urls_handler))
            .layer(Extension(current))
            .with_state(state);

        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_stats_merges_realtime_views() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_owned()
            .withf(|code, user_id| code == "abc12345" && *user_id == 9)
            .returning(|code, user_id| Ok(Some(stored_url(code, user_id, 3))));

        let mut cache = MockCacheService::new();
        cache.expect_get_views().returning(|_| Ok(7));

        let server = server_with(urls, cache);

        let response = server.get("/stats/abc12345").await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["data"]["views"], 3);
        assert_eq!(body["data"]["realtime_views"], 7);
    }

    #[tokio::test]
    async fn test_stats_foreign_code_is_404() {
        let mut urls = MockUrlRepository::new();
        // Ownership is enforced in the store query, so a foreign code
        // simply comes back empty.
        urls.expect_find_owned().returning(|_, _| Ok(None));

        let server = server_with(urls, MockCacheService::new());

        let response = server.get("/stats/notmine1").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_my_urls_lists_all_owned() {
        let mut urls = MockUrlRepository::new();
        urls.expect_list_for_user()
            .withf(|user_id| *user_id == 9)
            .returning(|user_id| {
                Ok(vec![
                    stored_url("code0001", user_id, 1),
                    stored_url("code0002", user_id, 2),
                ])
            });

        let mut cache = MockCacheService::new();
        cache.expect_get_views().returning(|_| Ok(0));

        let server = server_with(urls, cache);

        let response = server.get("/my-urls").await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["short_code"], "code0001");
        assert_eq!(data[1]["short_code"], "code0002");
    }

    #[tokio::test]
    async fn test_my_urls_empty_list() {
        let mut urls = MockUrlRepository::new();
        urls.expect_list_for_user().returning(|_| Ok(vec![]));

        let server = server_with(urls, MockCacheService::new());

        let response = server.get("/my-urls").await;

        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}
