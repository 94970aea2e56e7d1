//! REST API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::AppState;
use crate::notion::NotionError;
use crate::service;
use crate::types::{DatabaseListResponse, NextTaskResponse};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Errors returned by API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Notion(#[from] NotionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Notion(e) if e.is_configuration() => StatusCode::BAD_REQUEST,
            ApiError::Notion(e) => {
                tracing::error!("Notion request failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database_configured: bool,
    pub auth_configured: bool,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        database_configured: state.config.notion.database().is_some(),
        auth_configured: state.secret().is_some(),
    })
}

/// Highest-priority open task
pub async fn next_task(State(state): State<AppState>) -> Result<Json<NextTaskResponse>, ApiError> {
    let now = state.now();
    let response = service::fetch_next_task(state.source.as_ref(), &state.config, now).await?;
    Ok(Json(response))
}

/// Debug listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct DebugListParams {
    /// Optional database name filter
    #[serde(default)]
    pub q: String,
}

/// Databases visible to the integration token
pub async fn debug_list(
    State(state): State<AppState>,
    Query(params): Query<DebugListParams>,
) -> Result<Json<DatabaseListResponse>, ApiError> {
    let response = service::list_databases(state.source.as_ref(), &params.q).await?;
    Ok(Json(response))
}
