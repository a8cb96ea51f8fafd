//! Storedash Admin library.
//!
//! This crate provides the dashboard server as a library, allowing it to be
//! tested and reused:
//! - Server-rendered pages for managing stores and their catalog
//! - A per-store JSON API consumed by storefronts
//!
//! # Identity
//!
//! Authentication happens upstream. Every owner-only route reads the owner
//! id from the configured identity header (`x-user-id` by default) and
//! scopes all queries to stores that owner created.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod resources;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use middleware::create_session_layer;
use state::AppState;

/// Directory of the stylesheet and form script, relative to the workspace.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Build the complete application.
///
/// # Panics
///
/// Panics if the session store cannot be created (see
/// [`create_session_layer`]).
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::DashboardConfig;

    /// An app whose pool never connects: routes that reject early answer
    /// normally, anything that reaches the database sees it fail quickly.
    fn offline_app() -> Router {
        let config = DashboardConfig::for_tests();
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(250))
            .connect_lazy("postgres://127.0.0.1:1/storedash_offline")
            .expect("lazy pool");
        app(AppState::new(config, pool))
    }

    async fn text_body(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_health() {
        let response = offline_app()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_store_api_requires_identity() {
        let response = offline_app()
            .oneshot(Request::get("/api/stores").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected_before_store_lookup() {
        let store_id = storedash_core::StoreId::generate();
        let request = Request::post(format!("/api/{store_id}/billboards"))
            .header("x-user-id", "user_123")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"label":"","imageUrl":""}"#))
            .expect("request");

        let response = offline_app().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .expect("errors array")
            .iter()
            .filter_map(|error| error["field"].as_str())
            .collect();
        assert!(fields.contains(&"label"));
        assert!(fields.contains(&"imageUrl"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let store_id = storedash_core::StoreId::generate();
        let request = Request::post(format!("/api/{store_id}/sizes"))
            .header("x-user-id", "user_123")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");

        let response = offline_app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_store_id_is_not_found() {
        let response = offline_app()
            .oneshot(
                Request::get("/api/not-a-uuid/billboards")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_requires_identity() {
        let response = offline_app()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_store_create_failure_keeps_form_with_notice() {
        let request = Request::post("/stores")
            .header("x-user-id", "user_123")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Corner+Shop"))
            .expect("request");

        let response = offline_app().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = text_body(response).await;
        assert!(html.contains("Something went wrong."));
        assert!(html.contains(r#"value="Corner Shop""#));
        assert!(html.contains(r#"action="/stores""#));
    }
}
