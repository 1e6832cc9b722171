#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use report_engine_api::config::ServerConfig;
use report_engine_api::router::build_app_router;
use report_engine_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A small scenario in the canonical id-keyed shape.
pub fn canonical_scenario() -> serde_json::Value {
    serde_json::json!({
        "version": 2,
        "entities": [
            {"id": "ent-1", "name": "Alice", "type": "Person"},
            {"id": "ent-2", "name": "Acme", "type": "Organization"}
        ],
        "locations": [{"id": "loc-1", "name": "Warehouse"}],
        "events": [{
            "id": "evt-1",
            "what": "Meeting",
            "when": "Dawn",
            "why": "Deal",
            "location_id": "loc-1",
            "entity_ids": ["ent-1", "ent-2"]
        }]
    })
}

/// The same scenario in the legacy name-keyed shape.
pub fn legacy_scenario() -> serde_json::Value {
    serde_json::json!({
        "entities": [
            {"name": "Alice", "type": "Person"},
            {"name": "Acme", "type": "Organization"}
        ],
        "locations": [{"name": "Warehouse"}],
        "events": [{
            "what": "Meeting",
            "when": "Dawn",
            "why": "Deal",
            "where": "Warehouse",
            "who": ["Alice", "Acme"]
        }]
    })
}
