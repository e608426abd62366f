//! Synthetic agent activity logs

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rows generated per request
pub const LOG_ROWS: usize = 15;
/// Spacing between consecutive rows
pub const LOG_INTERVAL_MINUTES: i64 = 30;

/// Severity of a log row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Routine event
    Info,
    /// Needs attention
    Warning,
    /// Failure
    Error,
}

/// One row of an agent's activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLog {
    /// `log-{index}`
    pub id: String,
    /// When the event happened
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// What happened
    pub message: String,
    /// Extra detail line
    pub details: String,
}

fn messages_for(agent_id: &str) -> &'static [&'static str] {
    match agent_id {
        "safety" => &[
            "PPE compliance check completed",
            "Zone congestion alert cleared",
            "Safety protocol updated",
            "Camera feed analysis complete",
        ],
        "labour" => &[
            "Shift schedule optimized",
            "Staff utilization calculated",
            "Break schedule updated",
            "Overtime alert generated",
        ],
        "dock" => &[
            "Truck assigned to dock",
            "Dock schedule updated",
            "Priority queue processed",
            "Loading completion confirmed",
        ],
        "rfp" => &[
            "RFP template matched",
            "Pricing calculation completed",
            "Draft proposal generated",
            "Compliance check passed",
        ],
        "retail" => &[
            "Inventory compliance verified",
            "Temperature log reviewed",
            "Expiry date check completed",
            "Labeling audit finished",
        ],
        _ => &["System event processed"],
    }
}

/// Message of row `index` for `agent_id`
pub fn log_message(agent_id: &str, index: usize) -> &'static str {
    let messages = messages_for(agent_id);
    messages[index % messages.len()]
}

/// Generate the activity log for an agent, newest first
/// Any id is accepted; unknown agents get generic messages
pub fn generate_logs(agent_id: &str) -> Vec<AgentLog> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let levels = [LogLevel::Info, LogLevel::Warning, LogLevel::Error];

    (0..LOG_ROWS)
        .map(|i| AgentLog {
            id: format!("log-{i}"),
            timestamp: now - Duration::minutes(i as i64 * LOG_INTERVAL_MINUTES),
            level: levels[rng.gen_range(0..levels.len())],
            message: log_message(agent_id, i).to_string(),
            details: format!("Processed {} items", rng.gen_range(0..100)),
        })
        .collect()
}
