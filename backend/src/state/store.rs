// Client-side store
// Holds the agent and connector lists and reconciles them with the mock API

use super::{Agent, AgentPatch, AgentStatus, Connector, ConnectorPatch};
use crate::chat::ChatReply;
use crate::dispatcher::{AgentAction, AgentLog, ApiResponse, FlowDocument, MockDispatcher};
use crate::error::AppError;
use crate::state::seed::{seed_agents, seed_connectors};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Everything a view renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Agent list
    pub agents: Vec<Agent>,
    /// Connector list
    pub connectors: Vec<Connector>,
    /// A load or update is in flight
    pub loading: bool,
    /// Last failure message, cleared when the next load or update starts
    pub error: Option<String>,
}

impl StoreState {
    /// State holding the seed tables
    pub fn seeded() -> Self {
        Self {
            agents: seed_agents(),
            connectors: seed_connectors(),
            loading: false,
            error: None,
        }
    }

    /// Look up an agent by id
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Look up a connector by id
    pub fn connector(&self, id: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.id == id)
    }
}

/// Store wrapping CRUD over the mock API
///
/// Clones share state, and every clone publishes to the same subscribers.
#[derive(Debug, Clone)]
pub struct AgentStore {
    dispatcher: MockDispatcher,
    state: Arc<RwLock<StoreState>>,
    updates: Arc<watch::Sender<StoreState>>,
}

fn to_body<T: Serialize>(patch: &T) -> Result<Value, AppError> {
    serde_json::to_value(patch).map_err(|e| AppError::Internal(e.into()))
}

impl AgentStore {
    /// Store seeded with the demo tables, talking to `dispatcher`
    pub fn new(dispatcher: MockDispatcher) -> Self {
        Self::with_state(dispatcher, StoreState::seeded())
    }

    /// Store starting from an explicit state
    pub fn with_state(dispatcher: MockDispatcher, initial: StoreState) -> Self {
        let (updates, _) = watch::channel(initial.clone());
        Self {
            dispatcher,
            state: Arc::new(RwLock::new(initial)),
            updates: Arc::new(updates),
        }
    }

    /// Receive a fresh snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.updates.subscribe()
    }

    /// Dispatcher the store talks to
    pub fn dispatcher(&self) -> &MockDispatcher {
        &self.dispatcher
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Agent with `id`, if the store holds one
    pub async fn get_agent(&self, id: &str) -> Option<Agent> {
        self.state.read().await.agent(id).cloned()
    }

    /// Connector with `id`, if the store holds one
    pub async fn get_connector(&self, id: &str) -> Option<Connector> {
        self.state.read().await.connector(id).cloned()
    }

    /// Overwrite the error message
    pub async fn set_error(&self, error: Option<String>) {
        self.mutate(|state| state.error = error).await;
    }

    /// Overwrite the loading flag
    pub async fn set_loading(&self, loading: bool) {
        self.mutate(|state| state.loading = loading).await;
    }

    /// Refresh both lists
    pub async fn initialize(&self) -> Result<(), AppError> {
        self.load_agents().await?;
        self.load_connectors().await
    }

    /// Replace the agent list with the server's
    pub async fn load_agents(&self) -> Result<(), AppError> {
        self.load_agents_with(&CancellationToken::new()).await
    }

    /// `load_agents`, abandoned if `token` fires
    pub async fn load_agents_with(&self, token: &CancellationToken) -> Result<(), AppError> {
        self.begin().await;
        let result = self.dispatcher.get_with("/agents", token).await;
        self.settle(token, "/agents", result, |state, response| {
            state.agents = response.data.into_agents()?;
            Ok(())
        })
        .await
    }

    /// Replace the connector list with the server's
    pub async fn load_connectors(&self) -> Result<(), AppError> {
        self.load_connectors_with(&CancellationToken::new()).await
    }

    /// `load_connectors`, abandoned if `token` fires
    pub async fn load_connectors_with(&self, token: &CancellationToken) -> Result<(), AppError> {
        self.begin().await;
        let result = self.dispatcher.get_with("/connectors", token).await;
        self.settle(token, "/connectors", result, |state, response| {
            state.connectors = response.data.into_connectors()?;
            Ok(())
        })
        .await
    }

    /// Patch an agent and reconcile the local copy
    pub async fn update_agent(&self, id: &str, patch: AgentPatch) -> Result<Agent, AppError> {
        self.update_agent_with(id, patch, &CancellationToken::new())
            .await
    }

    /// `update_agent`, abandoned if `token` fires
    pub async fn update_agent_with(
        &self,
        id: &str,
        patch: AgentPatch,
        token: &CancellationToken,
    ) -> Result<Agent, AppError> {
        let path = format!("/agents/{id}");
        let body = to_body(&patch)?;
        self.begin().await;
        let result = self.dispatcher.patch_with(&path, body, token).await;
        self.settle(token, &path, result, |state, response| {
            let updated = response.data.into_agent()?;
            if let Some(slot) = state.agents.iter_mut().find(|a| a.id == updated.id) {
                *slot = updated.clone();
            }
            Ok(updated)
        })
        .await
    }

    /// Patch a connector and reconcile the local copy
    pub async fn update_connector(
        &self,
        id: &str,
        patch: ConnectorPatch,
    ) -> Result<Connector, AppError> {
        self.update_connector_with(id, patch, &CancellationToken::new())
            .await
    }

    /// `update_connector`, abandoned if `token` fires
    pub async fn update_connector_with(
        &self,
        id: &str,
        patch: ConnectorPatch,
        token: &CancellationToken,
    ) -> Result<Connector, AppError> {
        let path = format!("/connectors/{id}");
        let body = to_body(&patch)?;
        self.begin().await;
        let result = self.dispatcher.patch_with(&path, body, token).await;
        self.settle(token, &path, result, |state, response| {
            let updated = response.data.into_connector()?;
            if let Some(slot) = state.connectors.iter_mut().find(|c| c.id == updated.id) {
                *slot = updated.clone();
            }
            Ok(updated)
        })
        .await
    }

    /// Flip an agent between running and stopped
    pub async fn toggle_agent_status(&self, id: &str) -> Result<Agent, AppError> {
        self.toggle_agent_status_with(id, &CancellationToken::new())
            .await
    }

    /// `toggle_agent_status`, abandoned if `token` fires
    pub async fn toggle_agent_status_with(
        &self,
        id: &str,
        token: &CancellationToken,
    ) -> Result<Agent, AppError> {
        let current = self
            .get_agent(id)
            .await
            .ok_or_else(|| AppError::AgentNotFound(id.to_string()))?;
        let target = current.status.toggled();
        let action = match target {
            AgentStatus::Running => AgentAction::Resume,
            _ => AgentAction::Pause,
        };
        debug!(agent = id, from = current.status.as_str(), to = target.as_str(), "toggling agent");

        let path = format!("/agents/{id}/action");
        if let Err(e) = self
            .dispatcher
            .post_with(&path, json!({ "action": action.as_str() }), token)
            .await
        {
            return Err(self.fail(e).await);
        }

        self.update_agent_with(id, AgentPatch::status(target), token)
            .await
    }

    /// Mark a connector healthy again
    pub async fn fix_connector(&self, id: &str) -> Result<Connector, AppError> {
        self.fix_connector_with(id, &CancellationToken::new()).await
    }

    /// `fix_connector`, abandoned if `token` fires
    pub async fn fix_connector_with(
        &self,
        id: &str,
        token: &CancellationToken,
    ) -> Result<Connector, AppError> {
        self.update_connector_with(id, ConnectorPatch::healthy(), token)
            .await
    }

    /// Route a chat message and return the structured reply
    pub async fn send_chat_message(&self, message: &str) -> Result<ChatReply, AppError> {
        self.send_chat_message_with(message, &CancellationToken::new())
            .await
    }

    /// `send_chat_message`, abandoned if `token` fires
    pub async fn send_chat_message_with(
        &self,
        message: &str,
        token: &CancellationToken,
    ) -> Result<ChatReply, AppError> {
        let result = self
            .dispatcher
            .post_with("/chat", json!({ "message": message }), token)
            .await
            .and_then(|response| response.data.into_chat());
        match result {
            Ok(reply) => Ok(reply),
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Activity log rows for an agent
    pub async fn fetch_agent_logs(&self, id: &str) -> Result<Vec<AgentLog>, AppError> {
        self.fetch_agent_logs_with(id, &CancellationToken::new())
            .await
    }

    /// `fetch_agent_logs`, abandoned if `token` fires
    pub async fn fetch_agent_logs_with(
        &self,
        id: &str,
        token: &CancellationToken,
    ) -> Result<Vec<AgentLog>, AppError> {
        let path = format!("/agents/{id}/logs");
        let result = self
            .dispatcher
            .get_with(&path, token)
            .await
            .and_then(|response| response.data.into_logs());
        match result {
            Ok(logs) => Ok(logs),
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Flow document for an agent
    pub async fn fetch_flow(&self, id: &str) -> Result<FlowDocument, AppError> {
        self.fetch_flow_with(id, &CancellationToken::new()).await
    }

    /// `fetch_flow`, abandoned if `token` fires
    pub async fn fetch_flow_with(
        &self,
        id: &str,
        token: &CancellationToken,
    ) -> Result<FlowDocument, AppError> {
        let path = format!("/flows/{id}");
        let result = self
            .dispatcher
            .get_with(&path, token)
            .await
            .and_then(|response| response.data.into_flow());
        match result {
            Ok(flow) => Ok(flow),
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn mutate(&self, change: impl FnOnce(&mut StoreState)) {
        let mut state = self.state.write().await;
        change(&mut state);
        self.updates.send_replace(state.clone());
    }

    async fn begin(&self) {
        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        })
        .await;
    }

    /// Record a failure that happened outside `settle`
    async fn fail(&self, error: AppError) -> AppError {
        if error.is_cancelled() {
            debug!(error = %error, "store call cancelled");
            return error;
        }
        warn!(error = %error, "store call failed");
        let message = error.to_string();
        self.mutate(|state| state.error = Some(message)).await;
        error
    }

    /// Apply a dispatcher result under the write lock
    ///
    /// A token cancelled while the response was in flight discards it.
    async fn settle<T>(
        &self,
        token: &CancellationToken,
        path: &str,
        result: Result<ApiResponse, AppError>,
        apply: impl FnOnce(&mut StoreState, ApiResponse) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut state = self.state.write().await;
        state.loading = false;

        let outcome = match result {
            Ok(_) if token.is_cancelled() => Err(AppError::Cancelled(path.to_string())),
            Ok(response) => apply(&mut state, response),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(_) => debug!(path, "store updated"),
            Err(e) if e.is_cancelled() => debug!(path, "response discarded"),
            Err(e) => {
                warn!(path, error = %e, "store call failed");
                state.error = Some(e.to_string());
            }
        }

        self.updates.send_replace(state.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::LatencyProfile;
    use crate::state::ConnectorStatus;

    fn store() -> AgentStore {
        AgentStore::new(MockDispatcher::new(LatencyProfile::none()))
    }

    #[tokio::test]
    async fn test_seeded_on_creation() {
        let state = store().snapshot().await;
        assert_eq!(state.agents.len(), 5);
        assert_eq!(state.connectors.len(), 11);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_update_agent_reconciles() {
        let store = store();
        assert_eq!(
            store.get_agent("dock").await.unwrap().status,
            AgentStatus::Stopped
        );
        store
            .update_agent("dock", AgentPatch::status(AgentStatus::Running))
            .await
            .unwrap();
        assert_eq!(
            store.get_agent("dock").await.unwrap().status,
            AgentStatus::Running
        );
    }

    #[tokio::test]
    async fn test_failed_update_records_error() {
        let store = store();
        let err = store
            .update_agent("ghost", AgentPatch::status(AgentStatus::Running))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let state = store.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Agent ghost not found"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_toggle_unknown_agent() {
        let err = store().toggle_agent_status("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::AgentNotFound(_)));
    }

    #[tokio::test]
    async fn test_fix_connector() {
        let store = store();
        let fixed = store.fix_connector("custom_api").await.unwrap();
        assert_eq!(fixed.status, ConnectorStatus::Connected);
        assert_eq!(fixed.last_sync, "Just now");
        assert_eq!(store.get_connector("custom_api").await.unwrap(), fixed);
    }

    #[tokio::test]
    async fn test_cancelled_update_leaves_state() {
        let store = store();
        let before = store.snapshot().await;
        let token = CancellationToken::new();
        token.cancel();

        let err = store
            .update_agent_with("dock", AgentPatch::status(AgentStatus::Running), &token)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());

        let after = store.snapshot().await;
        assert_eq!(after.agents, before.agents);
        assert!(after.error.is_none());
        assert!(!after.loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_mutations() {
        let store = store();
        let mut rx = store.subscribe();
        store.set_error(Some("boom".into())).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().error.as_deref(), Some("boom"));
    }
}
