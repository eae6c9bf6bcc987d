// SPDX-License-Identifier: MIT

//! Shared helpers for integration tests.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use pace_tracker::{config::Config, db::Store, routes::create_router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = Store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    store.migrate().await.expect("Failed to migrate test database");

    let state = Arc::new(AppState { config, store });
    (create_router(state.clone()), state)
}

/// Send a GET request.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a request with a JSON body.
#[allow(dead_code)]
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a DELETE request.
#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid activity payload for seeding.
#[allow(dead_code)]
pub fn activity_payload(user_id: i64, date: &str, moving_time: &str, distance_km: f64) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id,
        "date": date,
        "time": "10:00",
        "activity": "run",
        "activity_type": "trail",
        "moving_time": moving_time,
        "distance_km": distance_km,
        "perceived_effort": 8,
        "elevation_m": 15
    })
}

/// Seed an activity, asserting the create succeeded.
#[allow(dead_code)]
pub async fn seed_activity(app: &Router, payload: &serde_json::Value) {
    let response = send_json(app, "POST", "/activities", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
