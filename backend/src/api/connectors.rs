//! Connector API handlers

use super::{json_body, record_path};
use crate::dispatcher::{ApiResponse, MockDispatcher};
use crate::error::AppError;
use crate::state::ConnectorId;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
};

fn connector_path(id: &str) -> Result<String, AppError> {
    record_path("connectors", id, AppError::ConnectorNotFound)
}

/// GET /api/connectors - List all connectors
pub async fn list_connectors(
    State(dispatcher): State<MockDispatcher>,
) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(dispatcher.get("/connectors").await?))
}

/// GET /api/connectors/:id - Get a specific connector
pub async fn get_connector(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<ConnectorId>,
) -> Result<Json<ApiResponse>, AppError> {
    Ok(Json(dispatcher.get(&connector_path(&id)?).await?))
}

/// PATCH /api/connectors/:id - Shallow-merge fields into a connector
pub async fn update_connector(
    State(dispatcher): State<MockDispatcher>,
    Path(id): Path<ConnectorId>,
    body: Bytes,
) -> Result<Json<ApiResponse>, AppError> {
    let path = connector_path(&id)?;
    Ok(Json(dispatcher.patch(&path, json_body(&body)?).await?))
}
