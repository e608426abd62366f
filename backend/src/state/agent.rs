// Agent records
// The mock "AI worker" entries surfaced by Agent Studio

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for an agent
pub type AgentId = String;

/// Agent status enumeration
/// Represents the current lifecycle state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent is processing normally
    Running,
    /// Agent is running but reporting a problem
    Warning,
    /// Agent has been paused or failed
    Stopped,
}

impl AgentStatus {
    /// Status a toggle moves to: running agents stop, everything else runs
    pub fn toggled(self) -> Self {
        match self {
            AgentStatus::Running => AgentStatus::Stopped,
            AgentStatus::Warning | AgentStatus::Stopped => AgentStatus::Running,
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Running => "running",
            AgentStatus::Warning => "warning",
            AgentStatus::Stopped => "stopped",
        }
    }
}

/// Agent structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Stable lookup key
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Current status of the agent
    pub status: AgentStatus,
    /// Headline KPI text
    pub kpi: String,
    /// One-line description
    pub description: String,
    /// Connectors the agent reads from; dangling ids are tolerated
    pub connector_ids: Vec<String>,
    /// Free-form tuning parameters
    pub config: Map<String, Value>,
    /// Name of the flow document describing the agent's logic
    pub flow: String,
    /// Human-readable time of the last event
    pub last_activity: String,
    /// Longer description for the details drawer
    pub details: String,
    /// Release label, e.g. "v2.1"
    pub version: String,
}

/// Partial agent update
///
/// Has no `id` field; an `id` key in a JSON patch body is dropped during
/// deserialization, so a patch never re-keys an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    /// New KPI text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpi: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement connector list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_ids: Option<Vec<String>>,
    /// Replacement config map (replaces the whole map)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    /// New flow name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
    /// New last-activity text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    /// New details text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// New version label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl AgentPatch {
    /// Patch that only sets the status
    pub fn status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Patch that only replaces the config map
    pub fn config(config: Map<String, Value>) -> Self {
        Self {
            config: Some(config),
            ..Default::default()
        }
    }
}

impl Agent {
    /// Shallow-merge a patch into this agent
    /// Every present field replaces the current value wholesale
    pub fn apply(&mut self, patch: AgentPatch) {
        let AgentPatch {
            name,
            status,
            kpi,
            description,
            connector_ids,
            config,
            flow,
            last_activity,
            details,
            version,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(kpi) = kpi {
            self.kpi = kpi;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(connector_ids) = connector_ids {
            self.connector_ids = connector_ids;
        }
        if let Some(config) = config {
            self.config = config;
        }
        if let Some(flow) = flow {
            self.flow = flow;
        }
        if let Some(last_activity) = last_activity {
            self.last_activity = last_activity;
        }
        if let Some(details) = details {
            self.details = details;
        }
        if let Some(version) = version {
            self.version = version;
        }
    }
}
