//! Agent API handlers
//!
//! Thin wrappers that forward to the mock dispatcher, so HTTP callers see the
//! same latency and failures as in-process callers.

use super::{json_body, record_path};
use crate::dispatcher::{ApiResponse, MockDispatcher};
use crate::error::AppError;
use crate::state::AgentId;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};

fn agent_path(id: &str) -> Result<String, AppError> {
    record_path("agents", id, AppError::AgentNotFound)
}

/// GET /api/agents - List all agents
pub async fn list_agents(
    State(dispatcher): State<MockDispatcher>,
) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(dispatcher.get("/agents").await?))
}

/// GET /api/agents/:id - Get a specific agent
pub async fn get_agent(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<AgentId>,
) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(dispatcher.get(&agent_path(&id)?).await?))
}

/// PATCH /api/agents/:id - Shallow-merge fields into an agent
pub async fn update_agent(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<AgentId>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let path = agent_path(&id)?;
    Ok(Json(dispatcher.patch(&path, json_body(&body)?).await?))
}

/// GET /api/agents/:id/logs - Synthetic activity log
pub async fn agent_logs(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<AgentId>,
) -> Result<Json<ApiResponse>, AppError> {
    let path = format!("{}/logs", agent_path(&id)?);
    Ok(Json(dispatcher.get(&path).await?))
}

/// POST /api/agents/:id/action - Pause, resume or fix an agent
pub async fn agent_action(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<AgentId>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let path = format!("{}/action", agent_path(&id)?);
    Ok(Json(dispatcher.post(&path, json_body(&body)?).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::LatencyProfile;
    use crate::state::AgentStatus;
    use serde_json::json;

    fn dispatcher() -> MockDispatcher {
        MockDispatcher::new(LatencyProfile::none())
    }

    #[tokio::test]
    async fn test_list_agents() {
        let response = list_agents(State(dispatcher())).await.unwrap();
        let agents = response.0.data.into_agents().unwrap();
        assert_eq!(agents.len(), 5);
    }

    #[tokio::test]
    async fn test_get_agent_not_found() {
        let result = get_agent(State(dispatcher()), Path("nonexistent".to_string())).await;
        match result.unwrap_err() {
            AppError::AgentNotFound(id) => assert_eq!(id, "nonexistent"),
            other => panic!("Expected AgentNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_agent() {
        let d = dispatcher();
        let response = update_agent(
            State(d.clone()),
            Path("dock".to_string()),
            Bytes::from(json!({ "status": "running", "id": "hijack" }).to_string()),
        )
        .await
        .unwrap();
        assert_eq!(response.0.message.as_deref(), Some("Agent updated successfully"));

        let agent = get_agent(State(d), Path("dock".to_string()))
            .await
            .unwrap()
            .0
            .data
            .into_agent()
            .unwrap();
        assert_eq!(agent.id, "dock");
        assert_eq!(agent.status, AgentStatus::Running);
    }

    #[tokio::test]
    async fn test_update_agent_rejects_malformed_body() {
        let result = update_agent(
            State(dispatcher()),
            Path("dock".to_string()),
            Bytes::from_static(b"status=running"),
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }
}
