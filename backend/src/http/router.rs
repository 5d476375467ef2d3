//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Calculators
        .route("/scales", get(handlers::list_scales))
        .route("/calculator/staffing", post(handlers::calculate_staffing))
        .route("/calculator/ratio", post(handlers::calculate_ratio))
        // Norms and statistics
        .route("/norms", get(handlers::get_norms))
        .route("/norms/details", get(handlers::get_norms_details))
        .route("/statistics", post(handlers::derive_statistics))
        // Snapshot
        .route("/snapshot", get(handlers::get_snapshot))
        .route("/snapshot/reload", post(handlers::reload_snapshot))
        // History
        .route("/projects", get(handlers::list_projects))
        .route("/projects/{project}/dynamics", get(handlers::get_project_dynamics))
        .route("/standards", get(handlers::get_standards));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Observation uploads for ad hoc statistics can be sizeable.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LocalRepository, NormsRepository};
    use crate::models::{CalculatorConfig, CalculatorMetadata, PositionNorms, StaffingConstants};
    use crate::services::{NormsSnapshot, SnapshotStore};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let config = CalculatorConfig {
            base_itr_per_100_workers: 10.0,
            position_group_percentages: BTreeMap::new(),
            metadata: CalculatorMetadata {
                source: "test".to_string(),
                projects_count: 0,
                data_period: String::new(),
            },
        };
        let snapshot =
            NormsSnapshot::new(PositionNorms::default(), config, StaffingConstants::default())
                .unwrap();
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn NormsRepository>;
        let state = AppState::new(repo, SnapshotStore::new(snapshot));
        let _router = create_router(state);
    }
}
