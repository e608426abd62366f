//! Error types and error handling for the application
//!
//! Every failure the mock API, the store, or the calculators can produce is an
//! `AppError`. All variants implement `IntoResponse` so the HTTP surface
//! reports them with the same JSON shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// The dispatcher rejects with one of these, the store records the message
/// and hands the error back to its caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given ID was not found
    #[error("Agent {0} not found")]
    AgentNotFound(String),

    /// Connector with the given ID was not found
    #[error("Connector {0} not found")]
    ConnectorNotFound(String),

    /// No flow document exists for the given ID
    #[error("Flow {0} not found")]
    FlowNotFound(String),

    /// Path does not belong to any known route family
    #[error("Unknown path: {0}")]
    UnknownRoute(String),

    /// Agent action other than pause, resume or fix
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Request body could not be decoded for the route
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The caller cancelled the request before it resolved
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Calculator input failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for the "entity id absent" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::AgentNotFound(_) | AppError::ConnectorNotFound(_) | AppError::FlowNotFound(_)
        )
    }

    /// True when the request was abandoned through its cancellation token
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled(_))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConnectorNotFound(_) => StatusCode::NOT_FOUND,
            AppError::FlowNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            AppError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_family() {
        assert!(AppError::AgentNotFound("x".into()).is_not_found());
        assert!(AppError::ConnectorNotFound("x".into()).is_not_found());
        assert!(AppError::FlowNotFound("x".into()).is_not_found());
        assert!(!AppError::UnknownRoute("/x".into()).is_not_found());
        assert!(!AppError::UnknownAction("jump".into()).is_not_found());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::AgentNotFound("ghost".into()).to_string(),
            "Agent ghost not found"
        );
        assert_eq!(
            AppError::UnknownRoute("/nope".into()).to_string(),
            "Unknown path: /nope"
        );
        assert_eq!(
            AppError::UnknownAction("jump".into()).to_string(),
            "Unknown action: jump"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::AgentNotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UnknownRoute("/x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UnknownAction("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Cancelled("/agents".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
