//! Master chat and flow handlers

use super::{json_body, record_path};
use crate::dispatcher::{ApiResponse, MockDispatcher};
use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};

/// POST /api/chat - Route a message to the agent that handles it
pub async fn send_message(
    State(dispatcher): State<MockDispatcher>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(dispatcher.post("/chat", json_body(&body)?).await?))
}

/// GET /api/flows/:id - Logic graph for an agent
pub async fn get_flow(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let path = record_path("flows", &id, AppError::FlowNotFound)?;
    Ok(Json(dispatcher.get(&path).await?))
}
