//! Integration tests for the HTTP surface
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use warehouse_studio_backend::api;
use warehouse_studio_backend::dispatcher::{LatencyProfile, MockDispatcher};

fn app(dispatcher: MockDispatcher) -> Router {
    api::router().with_state(dispatcher)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_agents() {
    let dispatcher = MockDispatcher::new(LatencyProfile::none());
    let (status, body) = send(
        app(dispatcher),
        Request::get("/api/agents").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_patch_then_get() {
    let dispatcher = MockDispatcher::new(LatencyProfile::none());
    let (status, body) = send(
        app(dispatcher.clone()),
        json_request("PATCH", "/api/agents/dock", json!({ "status": "running" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Agent updated successfully");

    let (_, body) = send(
        app(dispatcher),
        Request::get("/api/agents/dock").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(body["data"]["status"], "running");
}

#[tokio::test]
async fn test_missing_agent_is_404() {
    let dispatcher = MockDispatcher::new(LatencyProfile::none());
    let (status, body) = send(
        app(dispatcher),
        Request::get("/api/agents/ghost").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agent ghost not found");
}

#[tokio::test]
async fn test_logs_and_flow() {
    let dispatcher = MockDispatcher::new(LatencyProfile::none());
    let (status, body) = send(
        app(dispatcher.clone()),
        Request::get("/api/agents/dock/logs").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 15);

    let (status, body) = send(
        app(dispatcher),
        Request::get("/api/flows/dock").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["nodes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fix_connector_over_http() {
    let dispatcher = MockDispatcher::new(LatencyProfile::none());
    let (status, body) = send(
        app(dispatcher),
        json_request(
            "PATCH",
            "/api/connectors/custom_api",
            json!({ "status": "connected", "lastSync": "Just now" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "connected");
    assert_eq!(body["data"]["lastSync"], "Just now");
}
