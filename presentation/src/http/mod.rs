//! HTTP routes for the advice and evaluation use cases
//!
//! - `POST /management` runs the advisors and answers with the summary
//! - `POST /evaluate-management` replays the configured dataset
//! - `GET /health` answers `ok` for liveness checks

use advisor_application::{
    EvaluateManagementInput, EvaluateManagementUseCase, RunManagementInput, RunManagementUseCase,
};
use advisor_domain::Model;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared state for the HTTP routes
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<RunManagementUseCase>,
    pub evaluator: Arc<EvaluateManagementUseCase>,
}

impl AppState {
    pub fn new(runner: Arc<RunManagementUseCase>, evaluator: Arc<EvaluateManagementUseCase>) -> Self {
        Self { runner, evaluator }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub llm_version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManagementResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub llm_version: Option<String>,
}

/// Error answered by a route, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the router with permissive CORS
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/management", post(management_handler))
        .route("/evaluate-management", post(evaluate_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Run the advisors on one question
pub async fn management_handler(
    State(state): State<AppState>,
    Json(request): Json<ManagementRequest>,
) -> Result<Json<ManagementResponse>, ApiError> {
    if request.input.trim().is_empty() {
        return Err(ApiError::BadRequest("input must not be empty".to_string()));
    }

    let input = RunManagementInput::new(request.input)
        .with_model(Model::from_override(request.llm_version.as_deref()));

    let run = state.runner.execute(input).await.map_err(|e| {
        error!(error = %e, "Advice run failed");
        ApiError::Internal(e.to_string())
    })?;

    Ok(Json(ManagementResponse {
        message: run.summary_text().to_string(),
    }))
}

/// Replay the configured dataset; answers once every item has been attempted
pub async fn evaluate_handler(
    State(state): State<AppState>,
    request: Option<Json<EvaluateRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let input = EvaluateManagementInput::new()
        .with_model(Model::from_override(request.llm_version.as_deref()));

    let report = state.evaluator.execute(input).await.map_err(|e| {
        error!(error = %e, "Dataset evaluation failed");
        ApiError::Internal(e.to_string())
    })?;

    info!(
        run_name = %report.run_name,
        evaluated = report.evaluated,
        failed = report.failed,
        "Dataset evaluation finished"
    );

    Ok(Json(json!({ "success": true })))
}
