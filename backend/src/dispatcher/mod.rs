//! Mock request dispatcher
//!
//! Emulates a remote REST API over in-memory tables. Calls take string paths
//! and JSON bodies, sleep for a simulated round-trip, then read or mutate the
//! shared tables. Failures use the same `AppError` values the HTTP surface
//! reports.

pub mod flows;
pub mod latency;
pub mod logs;
pub mod route;

pub use flows::{load_flow, FlowDocument};
pub use latency::{LatencyProfile, LatencyWindow};
pub use logs::{generate_logs, AgentLog};
pub use route::{Method, Route};

use crate::chat::{self, ChatReply, ChatRequest};
use crate::error::AppError;
use crate::state::seed::{seed_agents, seed_connectors};
use crate::state::{Agent, AgentPatch, AgentStatus, Connector, ConnectorPatch};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The records behind the mock API
#[derive(Debug, Clone, Default)]
pub struct MockTables {
    /// Agent table
    pub agents: Vec<Agent>,
    /// Connector table
    pub connectors: Vec<Connector>,
}

impl MockTables {
    /// Tables filled from the seed data
    pub fn seeded() -> Self {
        Self {
            agents: seed_agents(),
            connectors: seed_connectors(),
        }
    }
}

/// Supported agent actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentAction {
    /// Stop the agent
    Pause,
    /// Start the agent again
    Resume,
    /// Clear the agent's fault and start it
    Fix,
}

impl AgentAction {
    /// Parse an action name; anything else is `UnknownAction`
    pub fn parse(action: &str) -> Result<Self, AppError> {
        match action {
            "pause" => Ok(AgentAction::Pause),
            "resume" => Ok(AgentAction::Resume),
            "fix" => Ok(AgentAction::Fix),
            other => Err(AppError::UnknownAction(other.to_string())),
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentAction::Pause => "pause",
            AgentAction::Resume => "resume",
            AgentAction::Fix => "fix",
        }
    }

    /// Status the agent ends up in
    pub fn resulting_status(&self) -> AgentStatus {
        match self {
            AgentAction::Pause => AgentStatus::Stopped,
            AgentAction::Resume | AgentAction::Fix => AgentStatus::Running,
        }
    }

    fn confirmation(&self, agent_id: &str) -> String {
        match self {
            AgentAction::Pause => format!("{agent_id} agent paused successfully"),
            AgentAction::Resume => format!("{agent_id} agent resumed successfully"),
            AgentAction::Fix => format!("{agent_id} agent issues resolved"),
        }
    }
}

/// Body of `/agents/{id}/action`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// `pause`, `resume` or `fix`
    pub action: String,
}

/// Result of an agent action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Status the action moves the agent to
    pub status: AgentStatus,
}

/// Data carried by a successful response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Agent list
    Agents(Vec<Agent>),
    /// Single agent
    Agent(Agent),
    /// Activity log rows
    AgentLogs(Vec<AgentLog>),
    /// Connector list
    Connectors(Vec<Connector>),
    /// Single connector
    Connector(Connector),
    /// Flow graph
    Flow(FlowDocument),
    /// Chat reply
    Chat(ChatReply),
    /// Agent action result
    Action(ActionOutcome),
}

fn unexpected(expected: &str, got: &Payload) -> AppError {
    AppError::Internal(anyhow::anyhow!("expected {expected} payload, got {got:?}"))
}

impl Payload {
    /// Unwrap an agent list
    pub fn into_agents(self) -> Result<Vec<Agent>, AppError> {
        match self {
            Payload::Agents(agents) => Ok(agents),
            other => Err(unexpected("agents", &other)),
        }
    }

    /// Unwrap a single agent
    pub fn into_agent(self) -> Result<Agent, AppError> {
        match self {
            Payload::Agent(agent) => Ok(agent),
            other => Err(unexpected("agent", &other)),
        }
    }

    /// Unwrap log rows
    pub fn into_logs(self) -> Result<Vec<AgentLog>, AppError> {
        match self {
            Payload::AgentLogs(logs) => Ok(logs),
            other => Err(unexpected("logs", &other)),
        }
    }

    /// Unwrap a connector list
    pub fn into_connectors(self) -> Result<Vec<Connector>, AppError> {
        match self {
            Payload::Connectors(connectors) => Ok(connectors),
            other => Err(unexpected("connectors", &other)),
        }
    }

    /// Unwrap a single connector
    pub fn into_connector(self) -> Result<Connector, AppError> {
        match self {
            Payload::Connector(connector) => Ok(connector),
            other => Err(unexpected("connector", &other)),
        }
    }

    /// Unwrap a flow document
    pub fn into_flow(self) -> Result<FlowDocument, AppError> {
        match self {
            Payload::Flow(flow) => Ok(flow),
            other => Err(unexpected("flow", &other)),
        }
    }

    /// Unwrap a chat reply
    pub fn into_chat(self) -> Result<ChatReply, AppError> {
        match self {
            Payload::Chat(reply) => Ok(reply),
            other => Err(unexpected("chat", &other)),
        }
    }

    /// Unwrap an action outcome
    pub fn into_action(self) -> Result<ActionOutcome, AppError> {
        match self {
            Payload::Action(outcome) => Ok(outcome),
            other => Err(unexpected("action", &other)),
        }
    }
}

/// Envelope of every successful dispatcher call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// Result data
    pub data: Payload,
    /// Confirmation text for mutations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    fn data(data: Payload) -> Self {
        Self {
            data,
            message: None,
        }
    }

    fn with_message(data: Payload, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}

/// In-process stand-in for the remote API
///
/// Clones share the same tables.
#[derive(Debug, Clone)]
pub struct MockDispatcher {
    tables: Arc<RwLock<MockTables>>,
    latency: LatencyProfile,
}

impl MockDispatcher {
    /// Dispatcher over freshly seeded tables
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_tables(MockTables::seeded(), latency)
    }

    /// Dispatcher over the given tables
    pub fn with_tables(tables: MockTables, latency: LatencyProfile) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
            latency,
        }
    }

    /// Latency profile in use
    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    /// GET `path`
    pub async fn get(&self, path: &str) -> Result<ApiResponse, AppError> {
        self.get_with(path, &CancellationToken::new()).await
    }

    /// PATCH `path` with a partial record
    pub async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, AppError> {
        self.patch_with(path, body, &CancellationToken::new()).await
    }

    /// POST `body` to `path`
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, AppError> {
        self.post_with(path, body, &CancellationToken::new()).await
    }

    /// GET `path`, abandoned if `token` fires first
    pub async fn get_with(
        &self,
        path: &str,
        token: &CancellationToken,
    ) -> Result<ApiResponse, AppError> {
        let delay = latency::simulate(self.latency, LatencyWindow::GET, token, path).await?;
        debug!(method = %Method::Get, path, delay_ms = delay.as_millis() as u64, "mock call");

        let result = match Route::parse(Method::Get, path) {
            Ok(route) => self.resolve_get(route).await,
            Err(e) => Err(e),
        };
        log_failure(Method::Get, path, result)
    }

    /// PATCH `path`, abandoned if `token` fires before the write
    pub async fn patch_with(
        &self,
        path: &str,
        body: Value,
        token: &CancellationToken,
    ) -> Result<ApiResponse, AppError> {
        let delay = latency::simulate(self.latency, LatencyWindow::PATCH, token, path).await?;
        debug!(method = %Method::Patch, path, delay_ms = delay.as_millis() as u64, "mock call");

        let result = match Route::parse(Method::Patch, path) {
            Ok(route) => self.resolve_patch(route, body, token, path).await,
            Err(e) => Err(e),
        };
        log_failure(Method::Patch, path, result)
    }

    /// POST to `path`, abandoned if `token` fires first
    pub async fn post_with(
        &self,
        path: &str,
        body: Value,
        token: &CancellationToken,
    ) -> Result<ApiResponse, AppError> {
        let delay = latency::simulate(self.latency, LatencyWindow::POST, token, path).await?;
        debug!(method = %Method::Post, path, delay_ms = delay.as_millis() as u64, "mock call");

        let result = match Route::parse(Method::Post, path) {
            Ok(route) => Self::resolve_post(route, body),
            Err(e) => Err(e),
        };
        log_failure(Method::Post, path, result)
    }

    async fn resolve_get(&self, route: Route) -> Result<ApiResponse, AppError> {
        let payload = match route {
            Route::Agents => Payload::Agents(self.tables.read().await.agents.clone()),
            Route::Agent(id) => {
                let tables = self.tables.read().await;
                let agent = tables
                    .agents
                    .iter()
                    .find(|a| a.id == id)
                    .cloned()
                    .ok_or(AppError::AgentNotFound(id))?;
                Payload::Agent(agent)
            }
            Route::AgentLogs(id) => Payload::AgentLogs(generate_logs(&id)),
            Route::Connectors => Payload::Connectors(self.tables.read().await.connectors.clone()),
            Route::Connector(id) => {
                let tables = self.tables.read().await;
                let connector = tables
                    .connectors
                    .iter()
                    .find(|c| c.id == id)
                    .cloned()
                    .ok_or(AppError::ConnectorNotFound(id))?;
                Payload::Connector(connector)
            }
            Route::Flow(id) => Payload::Flow(load_flow(&id)?),
            other => return Err(AppError::UnknownRoute(other.path())),
        };
        Ok(ApiResponse::data(payload))
    }

    async fn resolve_patch(
        &self,
        route: Route,
        body: Value,
        token: &CancellationToken,
        path: &str,
    ) -> Result<ApiResponse, AppError> {
        match route {
            Route::Agent(id) => {
                let patch: AgentPatch = decode(body)?;
                let mut tables = self.tables.write().await;
                if token.is_cancelled() {
                    return Err(AppError::Cancelled(path.to_string()));
                }
                let agent = tables
                    .agents
                    .iter_mut()
                    .find(|a| a.id == id)
                    .ok_or(AppError::AgentNotFound(id))?;
                agent.apply(patch);
                Ok(ApiResponse::with_message(
                    Payload::Agent(agent.clone()),
                    "Agent updated successfully",
                ))
            }
            Route::Connector(id) => {
                let patch: ConnectorPatch = decode(body)?;
                let mut tables = self.tables.write().await;
                if token.is_cancelled() {
                    return Err(AppError::Cancelled(path.to_string()));
                }
                let connector = tables
                    .connectors
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or(AppError::ConnectorNotFound(id))?;
                connector.apply(patch);
                Ok(ApiResponse::with_message(
                    Payload::Connector(connector.clone()),
                    "Connector updated successfully",
                ))
            }
            other => Err(AppError::UnknownRoute(other.path())),
        }
    }

    fn resolve_post(route: Route, body: Value) -> Result<ApiResponse, AppError> {
        match route {
            Route::Chat => {
                let request: ChatRequest = decode(body)?;
                Ok(ApiResponse::data(Payload::Chat(chat::respond(&request.message))))
            }
            Route::AgentAction(id) => {
                let request: ActionRequest = decode(body)?;
                let action = AgentAction::parse(&request.action)?;
                Ok(ApiResponse::with_message(
                    Payload::Action(ActionOutcome {
                        status: action.resulting_status(),
                    }),
                    action.confirmation(&id),
                ))
            }
            other => Err(AppError::UnknownRoute(other.path())),
        }
    }
}

fn log_failure<T>(method: Method, path: &str, result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(e) = &result {
        if !e.is_cancelled() {
            warn!(method = %method, path, error = %e, "mock call failed");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dispatcher() -> MockDispatcher {
        MockDispatcher::new(LatencyProfile::none())
    }

    #[tokio::test]
    async fn test_get_agents() {
        let response = dispatcher().get("/agents").await.unwrap();
        assert_eq!(response.data.into_agents().unwrap().len(), seed_agents().len());
    }

    #[tokio::test]
    async fn test_get_missing_agent() {
        let err = dispatcher().get("/agents/ghost").await.unwrap_err();
        assert!(matches!(err, AppError::AgentNotFound(id) if id == "ghost"));
    }

    #[tokio::test]
    async fn test_logs_for_any_id() {
        let logs = dispatcher()
            .get("/agents/ghost/logs")
            .await
            .unwrap()
            .data
            .into_logs()
            .unwrap();
        assert_eq!(logs.len(), logs::LOG_ROWS);
        assert_eq!(logs[0].message, "System event processed");
    }

    #[tokio::test]
    async fn test_patch_rejects_non_object_body() {
        let err = dispatcher()
            .patch("/agents/dock", json!("running"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_patch_is_shared_between_clones() {
        let first = dispatcher();
        let second = first.clone();
        first
            .patch("/connectors/custom_api", json!({ "status": "connected" }))
            .await
            .unwrap();
        let connector = second
            .get("/connectors/custom_api")
            .await
            .unwrap()
            .data
            .into_connector()
            .unwrap();
        assert_eq!(connector.status, crate::state::ConnectorStatus::Connected);
    }

    #[tokio::test]
    async fn test_action_outcomes() {
        let d = dispatcher();
        for (action, status, message) in [
            ("pause", AgentStatus::Stopped, "dock agent paused successfully"),
            ("resume", AgentStatus::Running, "dock agent resumed successfully"),
            ("fix", AgentStatus::Running, "dock agent issues resolved"),
        ] {
            let response = d
                .post("/agents/dock/action", json!({ "action": action }))
                .await
                .unwrap();
            assert_eq!(response.message.as_deref(), Some(message));
            assert_eq!(response.data.into_action().unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let err = dispatcher()
            .post("/agents/dock/action", json!({ "action": "explode" }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownAction(a) if a == "explode"));
    }

    #[tokio::test]
    async fn test_payload_serializes_untagged() {
        let response = dispatcher().get("/agents/dock").await.unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"]["id"], json!("dock"));
        assert!(value.get("message").is_none());
    }

    #[tokio::test]
    async fn test_cancelled_patch_never_writes() {
        let d = dispatcher();
        let token = CancellationToken::new();
        token.cancel();
        let err = d
            .patch_with("/agents/dock", json!({ "status": "running" }), &token)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());

        let dock = d.get("/agents/dock").await.unwrap().data.into_agent().unwrap();
        assert_eq!(dock.status, AgentStatus::Stopped);
    }
}
