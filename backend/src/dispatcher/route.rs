//! Path grammar of the mock API
//!
//! String paths such as `/agents/dock/logs` are parsed into typed routes once,
//! up front, so the dispatcher matches on an enum instead of splitting strings.

use crate::error::AppError;
use std::fmt;

/// Request method understood by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read
    Get,
    /// Shallow-merge update
    Patch,
    /// Chat and agent actions
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Patch => "PATCH",
            Method::Post => "POST",
        })
    }
}

/// A recognized mock API route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/agents`
    Agents,
    /// `/agents/{id}`
    Agent(String),
    /// `/agents/{id}/logs`
    AgentLogs(String),
    /// `/agents/{id}/action`
    AgentAction(String),
    /// `/connectors`
    Connectors,
    /// `/connectors/{id}`
    Connector(String),
    /// `/flows/{id}`
    Flow(String),
    /// `/chat`
    Chat,
}

impl Route {
    /// Parse `path` for `method`
    /// Fails with `UnknownRoute` when the pair matches no route family
    pub fn parse(method: Method, path: &str) -> Result<Self, AppError> {
        let unknown = || AppError::UnknownRoute(path.to_string());

        let trimmed = path.trim_end_matches('/');
        let rest = trimmed.strip_prefix('/').ok_or_else(unknown)?;
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(unknown());
        }

        let route = match (method, segments.as_slice()) {
            (Method::Get, ["agents"]) => Route::Agents,
            (Method::Get, ["agents", id]) => Route::Agent(id.to_string()),
            (Method::Get, ["agents", id, "logs"]) => Route::AgentLogs(id.to_string()),
            (Method::Get, ["connectors"]) => Route::Connectors,
            (Method::Get, ["connectors", id]) => Route::Connector(id.to_string()),
            (Method::Get, ["flows", id]) => Route::Flow(id.to_string()),
            (Method::Patch, ["agents", id]) => Route::Agent(id.to_string()),
            (Method::Patch, ["connectors", id]) => Route::Connector(id.to_string()),
            (Method::Post, ["chat"]) => Route::Chat,
            (Method::Post, ["agents", id, "action"]) => Route::AgentAction(id.to_string()),
            _ => return Err(unknown()),
        };
        Ok(route)
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Agents => "/agents".to_string(),
            Route::Agent(id) => format!("/agents/{id}"),
            Route::AgentLogs(id) => format!("/agents/{id}/logs"),
            Route::AgentAction(id) => format!("/agents/{id}/action"),
            Route::Connectors => "/connectors".to_string(),
            Route::Connector(id) => format!("/connectors/{id}"),
            Route::Flow(id) => format!("/flows/{id}"),
            Route::Chat => "/chat".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
