// Connector records
// Mock integrations an agent reads from

use serde::{Deserialize, Serialize};

/// Unique identifier for a connector
pub type ConnectorId = String;

/// Connector link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStatus {
    /// Link is healthy
    Connected,
    /// Link is not configured or switched off
    Disconnected,
    /// Link is failing
    Error,
}

/// Connector structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    /// Stable lookup key
    pub id: ConnectorId,
    /// Display name
    pub name: String,
    /// Integration kind (database, api, video, ...)
    #[serde(rename = "type")]
    pub connector_type: String,
    /// Current link state
    pub status: ConnectorStatus,
    /// Human-readable time of the last sync
    pub last_sync: String,
    /// Icon name used by the UI
    pub icon: String,
    /// Number of exposed endpoints
    pub endpoints: u32,
    /// Throughput label, e.g. "850GB/day"
    pub data_flow: String,
}

/// Partial connector update
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New integration kind
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
    /// New link state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectorStatus>,
    /// New last-sync text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    /// New icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// New endpoint count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<u32>,
    /// New throughput label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<String>,
}

impl ConnectorPatch {
    /// Patch applied when a connector is repaired
    pub fn healthy() -> Self {
        Self {
            status: Some(ConnectorStatus::Connected),
            last_sync: Some("Just now".to_string()),
            ..Default::default()
        }
    }
}

impl Connector {
    /// Shallow-merge a patch into this connector
    pub fn apply(&mut self, patch: ConnectorPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(connector_type) = patch.connector_type {
            self.connector_type = connector_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(last_sync) = patch.last_sync {
            self.last_sync = last_sync;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(endpoints) = patch.endpoints {
            self.endpoints = endpoints;
        }
        if let Some(data_flow) = patch.data_flow {
            self.data_flow = data_flow;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed::seed_connectors;
    use serde_json::json;

    #[test]
    fn test_healthy_patch() {
        let mut connector = seed_connectors()
            .into_iter()
            .find(|c| c.id == "custom_api")
            .unwrap();
        assert_eq!(connector.status, ConnectorStatus::Disconnected);

        connector.apply(ConnectorPatch::healthy());
        assert_eq!(connector.status, ConnectorStatus::Connected);
        assert_eq!(connector.last_sync, "Just now");
        assert_eq!(connector.id, "custom_api");
    }

    #[test]
    fn test_type_field_name() {
        let connector = seed_connectors().remove(0);
        let value = serde_json::to_value(&connector).unwrap();
        assert!(value.get("type").is_some());
        assert!(value.get("dataFlow").is_some());

        let patch: ConnectorPatch = serde_json::from_value(json!({ "type": "api" })).unwrap();
        assert_eq!(patch.connector_type.as_deref(), Some("api"));
    }
}
