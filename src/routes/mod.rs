//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - JSON API under `/api/...`
/// - Static SPA from the configured static dir with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    let static_service = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/health", get(http::http_health))
        .route("/api/lessons", get(http::http_list_lessons))
        .route("/api/lessons/:slug", get(http::http_get_lesson))
        .route("/api/standards", get(http::http_get_standards))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::path::Path;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn app(root: &Path) -> Router {
        let config = ServerConfig {
            lessons_dir: root.to_path_buf(),
            static_dir: root.join("static"),
            ..ServerConfig::default()
        };
        build_router(Arc::new(AppState::new(config)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn unknown_lesson_is_404_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/lessons/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "success": false, "message": "Lesson not found" }));
    }

    #[tokio::test]
    async fn malformed_lesson_is_500() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "[").unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/lessons/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_utf8_lesson_is_500_not_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), b"{\"title\": \"\xff\xfe\"}").unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/lessons/bad").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn lesson_is_served_with_quality_stamp() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("two-sum.json"), r#"{ "title": "Two Sum", "difficulty": "easy" }"#).unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/lessons/two-sum").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["title"], "Two Sum");
        assert_eq!(body["data"]["quality"]["status"], "NEEDS_FIX");
        assert_eq!(body["data"]["quality"]["score"], 70);
        assert_eq!(body["data"]["quality"]["standardsVersion"], "2025-12-30");
        assert_eq!(body["data"]["pseudocode"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn listing_is_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lesson-10-b.json"), r#"{ "title": "Ten" }"#).unwrap();
        std::fs::write(dir.path().join("lesson-02-a.json"), r#"{ "title": "Two" }"#).unwrap();
        std::fs::write(dir.path().join("lesson-05-c.json"), "{ nope").unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/lessons").await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Two", "Ten"]);
        assert_eq!(body["data"][0]["type"], "algorithm");
    }

    #[tokio::test]
    async fn listing_without_root_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(&dir.path().join("absent")), "/api/lessons").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn standards_are_published() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(dir.path()), "/api/standards").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["version"], "2025-12-30");
        assert_eq!(body["data"]["pseudocode"]["maxLines"], 10);
    }
}
