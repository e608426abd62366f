//! API module
//!
//! HTTP surface over the mock dispatcher. Routes mirror the dispatcher's path
//! grammar under `/api`.

pub mod agents;
pub mod chat;
pub mod connectors;

use crate::dispatcher::MockDispatcher;
use crate::error::AppError;
use axum::{
    body::Bytes,
    http::Uri,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct HelloResponse {
    message: String,
    status: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    message: String,
}

async fn hello_world() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from Warehouse Studio Backend!".to_string(),
        status: "ok".to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}

/// Parse a request body as JSON, whatever content type the client sent
pub(crate) fn json_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidBody(format!("failed to parse request body: {e}")))
}

/// Dispatcher path of one record
///
/// A decoded `%2F` would split the id into extra segments, so such ids are
/// reported as missing records of `family`.
pub(crate) fn record_path(
    family: &str,
    id: &str,
    not_found: fn(String) -> AppError,
) -> Result<String, AppError> {
    if id.is_empty() || id.contains('/') {
        return Err(not_found(id.to_string()));
    }
    Ok(format!("/{family}/{id}"))
}

/// Anything the table below does not match is the dispatcher's unknown path
async fn unknown_route(uri: Uri) -> AppError {
    let path = uri.path();
    AppError::UnknownRoute(path.strip_prefix("/api").unwrap_or(path).to_string())
}

/// Build the application routes; the caller supplies the dispatcher state
pub fn router() -> Router<MockDispatcher> {
    Router::new()
        .route("/", get(hello_world))
        .route("/api/health", get(health_check))
        .route("/api/agents", get(agents::list_agents))
        .route(
            "/api/agents/:id",
            get(agents::get_agent).patch(agents::update_agent),
        )
        .route("/api/agents/:id/logs", get(agents::agent_logs))
        .route("/api/agents/:id/action", post(agents::agent_action))
        .route("/api/connectors", get(connectors::list_connectors))
        .route(
            "/api/connectors/:id",
            get(connectors::get_connector).patch(connectors::update_connector),
        )
        .route("/api/flows/:id", get(chat::get_flow))
        .route("/api/chat", post(chat::send_message))
        .fallback(unknown_route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::LatencyProfile;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router().with_state(MockDispatcher::new(LatencyProfile::none()))
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_json() {
        let (status, body) = call(Request::get("/api/warehouses").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Unknown path: /warehouses");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_chat_route() {
        let request = Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "message": "Is the evening shift adequately staffed?" }).to_string(),
            ))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["handledBy"], "Labour Planner");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_json() {
        let request = Request::patch("/api/agents/dock")
            .header("content-type", "application/json")
            .body(Body::from("{ \"status\": "))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body: failed to parse request body"));
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_accepted() {
        let request = Request::post("/api/chat")
            .body(Body::from(json!({ "message": "Show me all PPE violations in the last hour" }).to_string()))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["handledBy"], "Safety Agent");
    }

    #[tokio::test]
    async fn test_encoded_slash_in_id_is_not_found() {
        let (status, body) = call(Request::get("/api/agents/dock%2Fextra").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Agent dock/extra not found");

        let (status, body) =
            call(Request::get("/api/connectors/a%2Fb").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Connector a/b not found");
    }

    #[test]
    fn test_record_path() {
        assert_eq!(
            record_path("agents", "dock", AppError::AgentNotFound).unwrap(),
            "/agents/dock"
        );
        assert!(matches!(
            record_path("flows", "a/b", AppError::FlowNotFound),
            Err(AppError::FlowNotFound(id)) if id == "a/b"
        ));
    }

    #[tokio::test]
    async fn test_unknown_action_is_400() {
        let request = Request::post("/api/agents/dock/action")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "action": "explode" }).to_string()))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown action: explode");
    }
}
