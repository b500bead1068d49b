//! Route group: homepage, health check, metrics, and static assets.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use tower_http::services::ServeDir;

use super::metrics::{HEALTH_CHECKS, REQUEST_COUNT, REQUEST_LATENCY};
use super::templates;
use crate::Config;

/// Shared state for request handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Registered routes, for the `routes` CLI command.
#[must_use]
pub fn route_table() -> &'static [(&'static str, &'static str)] {
    &[
        ("GET", "/"),
        ("GET", "/api/health"),
        ("GET", "/metrics"),
        ("GET", "/static/{*path}"),
    ]
}

/// Create the route group router.
pub fn create_routes_router(state: Arc<AppState>) -> Router {
    let static_assets = ServeDir::new(state.config.static_dir.clone());

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics))
        .nest_service("/static", static_assets)
        .with_state(state)
}

/// Homepage endpoint.
async fn index() -> impl IntoResponse {
    let _timer = REQUEST_LATENCY
        .with_label_values(&["/", "GET"])
        .start_timer();
    REQUEST_COUNT.with_label_values(&["/", "GET", "200"]).inc();
    Html(templates::INDEX)
}

/// Health check endpoint.
async fn health_check(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    let _timer = REQUEST_LATENCY
        .with_label_values(&["/api/health", "GET"])
        .start_timer();
    HEALTH_CHECKS.inc();
    REQUEST_COUNT
        .with_label_values(&["/api/health", "GET", "200"])
        .inc();

    let response = HealthResponse {
        message: "Hello, Plinth!".to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    tracing::debug!("Health check");

    (StatusCode::OK, Json(response))
}

/// Prometheus metrics endpoint.
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            tracing::trace!("Metrics encoded successfully");
            (
                StatusCode::OK,
                [(
                    axum::http::header::CONTENT_TYPE,
                    "text/plain; charset=utf-8",
                )],
                buffer,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(
                    axum::http::header::CONTENT_TYPE,
                    "text/plain; charset=utf-8",
                )],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default()))
    }

    #[tokio::test]
    async fn test_index_returns_html() {
        let state = create_test_state();
        let app = create_routes_router(state);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = create_test_state();
        let app = create_routes_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Hello, Plinth!");
    }

    #[tokio::test]
    async fn test_metrics() {
        let state = create_test_state();
        let app = create_routes_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let state = create_test_state();
        let app = create_routes_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/no-such-route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_route_table_covers_endpoints() {
        let table = route_table();
        assert!(table.contains(&("GET", "/")));
        assert!(table.contains(&("GET", "/api/health")));
    }
}
