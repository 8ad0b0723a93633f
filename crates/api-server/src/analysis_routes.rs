use analysis_core::{AnalysisResult, PropertySubmission};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::{ApiResponse, AppError, AppState, RequestId};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/analyze", post(analyze_property))
        .route("/api/analysis/:id", get(get_analysis))
        .route("/api/analyses", get(list_analyses))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        message: "Real Estate Analysis API is running",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn analyze_property(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<PropertySubmission>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisResult>>, AppError> {
    let Json(submission) = payload.map_err(|rejection| {
        AppError::bad_request(anyhow::anyhow!(
            "Invalid request body: {}",
            rejection.body_text()
        ))
        .with_request_id(&request_id)
    })?;

    let result = state
        .orchestrator
        .analyze_submission(submission)
        .map_err(|e| AppError::analysis(e).with_request_id(&request_id))?;

    tracing::info!(
        request_id = %request_id.0,
        property_id = %result.property_id,
        "Analysis served"
    );
    Ok(Json(ApiResponse::success(result)))
}

/// Results are not stored, so no id can be found.
async fn get_analysis(Path(id): Path<String>) -> Result<Json<ApiResponse<AnalysisResult>>, AppError> {
    tracing::debug!("Lookup for analysis {} with no result store", id);
    Err(AppError::not_found(anyhow::anyhow!(
        "Analysis not found. Results are not persisted."
    )))
}

async fn list_analyses() -> Json<ApiResponse<Vec<AnalysisResult>>> {
    Json(
        ApiResponse::success(Vec::new())
            .with_message("Analysis history is unavailable: results are not persisted."),
    )
}
