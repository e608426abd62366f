// Seed tables
// Demo records the dispatcher and the store start from

use super::agent::{Agent, AgentStatus};
use super::connector::{Connector, ConnectorStatus};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn agent(
    id: &str,
    name: &str,
    status: AgentStatus,
    kpi: &str,
    description: &str,
    connector_ids: &[&str],
    config: Value,
    last_activity: &str,
    details: &str,
    version: &str,
) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        status,
        kpi: kpi.to_string(),
        description: description.to_string(),
        connector_ids: connector_ids.iter().map(|c| c.to_string()).collect(),
        config: object(config),
        flow: id.to_string(),
        last_activity: last_activity.to_string(),
        details: details.to_string(),
        version: version.to_string(),
    }
}

/// Agents every fresh dispatcher and store start with
pub fn seed_agents() -> Vec<Agent> {
    vec![
        agent(
            "safety",
            "Safety Agent",
            AgentStatus::Running,
            "0 violations in last hour",
            "PPE & congestion alerts",
            &["camera_feed", "sharepoint"],
            json!({
                "detectionThreshold": 0.8,
                "alertChannels": ["slack", "email"],
                "checkInterval": 30,
                "ppeRequired": ["helmet", "vest", "gloves"],
                "congestionLimit": 15
            }),
            "10:42 AM",
            "Monitors PPE compliance and zone congestion from camera feeds.",
            "v2.1",
        ),
        agent(
            "labour",
            "Labour Planner",
            AgentStatus::Warning,
            "Shift understaffed at 6 pm",
            "Workforce scaling + forecast",
            &["manhattan", "wms_api"],
            json!({
                "targetUtilization": 85,
                "shiftDuration": 8,
                "breakTime": 30,
                "overtimeThreshold": 40,
                "forecastHorizon": 72
            }),
            "2:15 PM",
            "Forecasts demand and balances shift staffing against it.",
            "v1.8",
        ),
        agent(
            "dock",
            "Dock Scheduler",
            AgentStatus::Stopped,
            "API credentials expired",
            "Automated dock assignment",
            &["wms_api", "manhattan"],
            json!({
                "maxWaitTime": 45,
                "dockCapacity": 12,
                "priorityRules": ["express", "temperature_controlled", "oversized"],
                "scheduleBuffer": 15
            }),
            "Yesterday",
            "Assigns dock doors and sequences inbound trucks.",
            "v3.0",
        ),
        agent(
            "rfp",
            "RFP Response",
            AgentStatus::Running,
            "14 drafts in queue",
            "Proposal automation",
            &["sharepoint", "wms_api"],
            json!({
                "responseTime": 24,
                "templateVersion": "2024_Q1",
                "autoApprovalLimit": 50000,
                "requiredSections": ["pricing", "capacity", "timeline", "compliance"]
            }),
            "5 minutes ago",
            "Drafts proposal responses with pricing and capacity analysis.",
            "v1.5",
        ),
        agent(
            "retail",
            "Retail Compliance",
            AgentStatus::Running,
            "2 rule violations today",
            "Regulatory monitoring",
            &["wms_api", "sharepoint"],
            json!({
                "complianceRules": ["temperature", "expiry", "labeling", "storage"],
                "alertSeverity": "medium",
                "reportFrequency": "daily",
                "auditTrail": true
            }),
            "1:30 PM",
            "Checks retailer labelling, storage and regulatory rules.",
            "v2.0",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn connector(
    id: &str,
    name: &str,
    connector_type: &str,
    status: ConnectorStatus,
    last_sync: &str,
    icon: &str,
    endpoints: u32,
    data_flow: &str,
) -> Connector {
    Connector {
        id: id.to_string(),
        name: name.to_string(),
        connector_type: connector_type.to_string(),
        status,
        last_sync: last_sync.to_string(),
        icon: icon.to_string(),
        endpoints,
        data_flow: data_flow.to_string(),
    }
}

/// Connectors every fresh dispatcher and store start with
pub fn seed_connectors() -> Vec<Connector> {
    use ConnectorStatus::{Connected, Disconnected};

    vec![
        connector("camera_feed", "Security Camera Feed", "video", Connected, "Live streaming", "Camera", 128, "1.2TB/day"),
        connector("manhattan", "Manhattan WMS", "database", Connected, "5 seconds ago", "Database", 45, "850GB/day"),
        connector("wms_api", "WMS API Gateway", "api", Connected, "2 minutes ago", "Code", 72, "320GB/day"),
        connector("sharepoint", "SharePoint", "document", Connected, "1 hour ago", "FileText", 15, "45GB/day"),
        connector("powerbi", "PowerBI", "analytics", Connected, "Real-time", "BarChart", 25, "120GB/day"),
        connector("snowflake", "Snowflake", "database", Connected, "30 seconds ago", "Database", 50, "2.5TB/day"),
        connector("slack", "Slack", "communication", Connected, "Live", "MessageSquare", 8, "5GB/day"),
        connector("teams", "Microsoft Teams", "communication", Connected, "Live", "Users", 12, "8GB/day"),
        connector("salesforce", "Salesforce", "crm", Connected, "5 minutes ago", "Cloud", 35, "25GB/day"),
        connector("ftp", "FTP Directory", "file", Connected, "1 hour ago", "FolderOpen", 3, "100GB/day"),
        connector("custom_api", "Custom API", "api", Disconnected, "Not configured", "Settings", 0, "0GB/day"),
    ]
}
