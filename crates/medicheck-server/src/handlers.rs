//! HTTP request handlers for the analysis service.
//!
//! Implements analysis, drug information, catalog search and health check
//! endpoints using axum.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use medicheck_domain::traits::{InteractionRegistry, LlmProvider, TerminologyService};
use medicheck_domain::{AnalysisResult, DrugCandidate, DrugInfo};
use medicheck_pipeline::{AnalysisError, Orchestrator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
pub struct AppState<T, R, L>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    /// Interaction pipeline
    pub orchestrator: Arc<Orchestrator<T, R, L>>,
}

impl<T, R, L> Clone for AppState<T, R, L>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
        }
    }
}

impl<T, R, L> AppState<T, R, L>
where
    T: TerminologyService,
    R: InteractionRegistry,
    L: LlmProvider,
{
    /// Wrap an orchestrator
    pub fn new(orchestrator: Orchestrator<T, R, L>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Drug names, at least two distinct
    #[serde(default)]
    pub drugs: Vec<String>,
}

/// Drug information request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugInfoRequest {
    /// Drug to describe
    #[serde(default)]
    pub drug_name: Option<String>,
}

/// Catalog search query string
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Partial drug name
    #[serde(default)]
    pub term: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" when the process is serving
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or insufficient input
    BadRequest(String),
    /// The primary analysis source failed
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Validation(_) => AppError::BadRequest(e.user_message()),
            _ => {
                error!(error = %e, "Analysis failed");
                AppError::Upstream(e.user_message())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// POST /analyze - Run the interaction pipeline
async fn analyze<T, R, L>(
    State(state): State<AppState<T, R, L>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError>
where
    T: TerminologyService + 'static,
    R: InteractionRegistry + 'static,
    L: LlmProvider + 'static,
{
    let Json(request) = payload?;
    info!(drugs = request.drugs.len(), "Analyze request");

    let result = state.orchestrator.analyze_names(&request.drugs).await?;
    Ok(Json(result))
}

/// POST /drug-info - Single-drug monograph
async fn drug_info<T, R, L>(
    State(state): State<AppState<T, R, L>>,
    payload: Result<Json<DrugInfoRequest>, JsonRejection>,
) -> Result<Json<DrugInfo>, AppError>
where
    T: TerminologyService + 'static,
    R: InteractionRegistry + 'static,
    L: LlmProvider + 'static,
{
    let Json(request) = payload?;
    let drug_name = request
        .drug_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Drug name is required".to_string()))?;

    let info = state.orchestrator.drug_info(&drug_name).await?;
    Ok(Json(info))
}

/// GET /search?term= - Catalog search; empty on failure
async fn search<T, R, L>(
    State(state): State<AppState<T, R, L>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<DrugCandidate>>
where
    T: TerminologyService + 'static,
    R: InteractionRegistry + 'static,
    L: LlmProvider + 'static,
{
    Json(state.orchestrator.search(&params.term).await)
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<T, R, L>(state: AppState<T, R, L>) -> AxumRouter
where
    T: TerminologyService + 'static,
    R: InteractionRegistry + 'static,
    L: LlmProvider + 'static,
{
    AxumRouter::new()
        .route("/analyze", post(analyze::<T, R, L>))
        .route("/drug-info", post(drug_info::<T, R, L>))
        .route("/search", get(search::<T, R, L>))
        .route("/health", get(health_check))
        .with_state(state)
}
