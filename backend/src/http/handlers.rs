//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Calculations run against the snapshot current when the request
//! arrived; a concurrent reload does not affect them.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    HealthResponse, KStatistics, NormsDetailsQuery, NormsResponse, ProjectDynamicsResponse,
    ProjectListResponse, ProjectsQuery, RatioRequest, RatioResult, ReloadResponse,
    ScalesResponse, SnapshotInfo, StaffingRequest, StaffingResult, StandardsResponse,
    StatisticsRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::CalculationDetails;
use crate::services::filter_projects;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the document
/// source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
        snapshot_version: state.snapshots.current().version.clone(),
    }))
}

// =============================================================================
// Calculators
// =============================================================================

/// GET /v1/scales
pub async fn list_scales() -> HandlerResult<ScalesResponse> {
    Ok(Json(ScalesResponse::all()))
}

/// POST /v1/calculator/staffing
///
/// Scale-based staffing with mandatory and conditional roles.
pub async fn calculate_staffing(
    State(state): State<AppState>,
    Json(request): Json<StaffingRequest>,
) -> HandlerResult<StaffingResult> {
    let snapshot = state.snapshots.current();
    let result = snapshot.compute_staffing(&request)?;
    Ok(Json(result))
}

/// POST /v1/calculator/ratio
///
/// Legacy estimate from the company-wide ITR ratio.
pub async fn calculate_ratio(
    State(state): State<AppState>,
    Json(request): Json<RatioRequest>,
) -> HandlerResult<RatioResult> {
    let snapshot = state.snapshots.current();
    let result = snapshot.compute_ratio_based(&request.project_name, request.workers_count)?;
    Ok(Json(result))
}

// =============================================================================
// Norms and Statistics
// =============================================================================

/// GET /v1/norms
pub async fn get_norms(State(state): State<AppState>) -> HandlerResult<NormsResponse> {
    let snapshot = state.snapshots.current();
    Ok(Json(NormsResponse {
        snapshot: snapshot.info(),
        position_norms: snapshot.position_norms.clone(),
    }))
}

/// GET /v1/norms/details?role=..&scale=..
///
/// Audit trail behind the norms: observations, bounds and statistics.
pub async fn get_norms_details(
    State(state): State<AppState>,
    Query(query): Query<NormsDetailsQuery>,
) -> HandlerResult<CalculationDetails> {
    let details = state.repository.load_calculation_details().await?;
    Ok(Json(query.apply(details)))
}

/// POST /v1/statistics
///
/// Outlier-aware statistics over caller-supplied observations.
pub async fn derive_statistics(
    Json(request): Json<StatisticsRequest>,
) -> HandlerResult<KStatistics> {
    let stats = tokio::task::spawn_blocking(move || request.evaluate())
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;
    Ok(Json(stats))
}

// =============================================================================
// Snapshot
// =============================================================================

/// GET /v1/snapshot
pub async fn get_snapshot(State(state): State<AppState>) -> HandlerResult<SnapshotInfo> {
    Ok(Json(state.snapshots.current().info()))
}

/// POST /v1/snapshot/reload
///
/// Rebuild the snapshot from the repository and publish it. On failure the
/// current snapshot keeps serving.
pub async fn reload_snapshot(State(state): State<AppState>) -> HandlerResult<ReloadResponse> {
    let previous_version = state.snapshots.current().version.clone();
    let current = state.snapshots.reload(state.repository.as_ref()).await?;
    tracing::info!("Snapshot reload requested, serving {}", current.version);

    Ok(Json(ReloadResponse {
        changed: current.version != previous_version,
        previous_version,
        snapshot: current.info(),
    }))
}

// =============================================================================
// History
// =============================================================================

/// GET /v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> HandlerResult<ProjectListResponse> {
    let filters = query.into_filters()?;
    let projects = state.repository.load_projects().await?;
    let projects = filter_projects(&projects, &filters);
    let total = projects.len();

    Ok(Json(ProjectListResponse { projects, total }))
}

/// GET /v1/projects/{project}/dynamics
pub async fn get_project_dynamics(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> HandlerResult<ProjectDynamicsResponse> {
    let dynamics = state.repository.load_monthly_dynamics().await?;
    let series = dynamics
        .get(&project)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No monthly dynamics for project '{}'", project)))?;

    Ok(Json(ProjectDynamicsResponse {
        project,
        dynamics: series,
    }))
}

/// GET /v1/standards
pub async fn get_standards(State(state): State<AppState>) -> HandlerResult<StandardsResponse> {
    let projects = state.repository.load_projects().await?;
    let distribution = state.repository.load_position_distribution().await?;
    Ok(Json(StandardsResponse::build(&projects, &distribution)))
}
