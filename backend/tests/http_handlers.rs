//! HTTP handlers over a seeded in-memory repository.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tower::ServiceExt;

use itr_norms::algorithms::derive_statistics as statistics_for;
use itr_norms::api::{
    NormsDetailsQuery, ObservationInput, ProjectsQuery, RatioRequest, StaffingRequest,
    StaffingResult, StatisticsRequest,
};
use itr_norms::db::LocalRepository;
use itr_norms::http::handlers::{self, HandlerResult};
use itr_norms::http::{create_router, AppState};
use itr_norms::models::{
    CalculationDetails, ProjectObservation, ProjectScale, Role, RoleName, StaffingConstants,
};
use itr_norms::services::SnapshotStore;

async fn state() -> (AppState, LocalRepository) {
    let repo = support::seeded_repository();
    let snapshots = SnapshotStore::load(&repo, StaffingConstants::default())
        .await
        .unwrap();
    (AppState::new(Arc::new(repo.clone()), snapshots), repo)
}

fn status_of<T>(result: HandlerResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.into_response().status(),
    }
}

fn observations(role: &RoleName, ks: &[f64]) -> Vec<ProjectObservation> {
    ks.iter()
        .enumerate()
        .map(|(i, k)| {
            ProjectObservation::new(format!("P{}", i), role.clone(), ProjectScale::Large, *k, 1.0)
                .unwrap()
        })
        .collect()
}

// =============================================================================
// Health and calculators
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (state, repo) = state().await;
    let Json(health) = handlers::health_check(State(state.clone())).await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.repository, "connected");
    assert_eq!(health.snapshot_version, state.snapshots.current().version);

    repo.set_healthy(false);
    let Json(health) = handlers::health_check(State(state)).await.unwrap();
    assert_eq!(health.repository, "disconnected");
}

#[tokio::test]
async fn test_list_scales() {
    let Json(scales) = handlers::list_scales().await.unwrap();
    let codes: Vec<&str> = scales.scales.iter().map(|band| band.code.as_str()).collect();
    assert_eq!(codes, vec!["S", "M", "L", "XL"]);
}

#[tokio::test]
async fn test_calculate_staffing() {
    let (state, _) = state().await;
    let Json(result) =
        handlers::calculate_staffing(State(state), Json(StaffingRequest::new(200)))
            .await
            .unwrap();
    assert_eq!(result.total_mandatory, 23);
    assert_eq!(result.scale, ProjectScale::Large);
}

#[tokio::test]
async fn test_calculate_staffing_errors() {
    let (state, _) = state().await;

    let missing =
        handlers::calculate_staffing(State(state.clone()), Json(StaffingRequest::new(450))).await;
    assert_eq!(status_of(missing), StatusCode::UNPROCESSABLE_ENTITY);

    let invalid =
        handlers::calculate_staffing(State(state), Json(StaffingRequest::new(-5))).await;
    assert_eq!(status_of(invalid), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calculate_ratio() {
    let (state, _) = state().await;
    let request = RatioRequest {
        project_name: "ЖК Северный".to_string(),
        workers_count: 200,
    };
    let Json(result) = handlers::calculate_ratio(State(state), Json(request))
        .await
        .unwrap();

    assert_eq!(result.total_itr_recommended, 20);
    let count = |group: &str| {
        result
            .position_breakdown
            .iter()
            .find(|b| b.position_group == group)
            .map(|b| b.recommended_count)
    };
    assert_eq!(count("Мастер"), Some(8));
    assert_eq!(count("Производитель работ"), Some(5));
    assert_eq!(count("ГИП/Руководитель проекта"), Some(1));
}

// =============================================================================
// Norms, statistics and snapshot
// =============================================================================

#[tokio::test]
async fn test_get_norms() {
    let (state, _) = state().await;
    let Json(norms) = handlers::get_norms(State(state)).await.unwrap();
    assert_eq!(norms.snapshot.coefficients_count, 6);
    assert_eq!(norms.position_norms, support::reference_norms());
}

#[tokio::test]
async fn test_get_norms_details() {
    let (state, repo) = state().await;

    let absent =
        handlers::get_norms_details(State(state.clone()), Query(NormsDetailsQuery::default()))
            .await;
    assert_eq!(status_of(absent), StatusCode::NOT_FOUND);

    let foreman = Role::Foreman.role_name();
    let supervisor = Role::SiteSupervisor.role_name();
    let mut details = CalculationDetails::default();
    for role in [&foreman, &supervisor] {
        let stats = statistics_for(
            role,
            ProjectScale::Large,
            &observations(role, &[18.0, 20.0, 22.0]),
        )
        .unwrap();
        details.insert(role.clone(), ProjectScale::Large, stats);
    }
    repo.set_calculation_details(details);

    let query = NormsDetailsQuery {
        role: Some(foreman.to_string()),
        scale: None,
    };
    let Json(filtered) = handlers::get_norms_details(State(state), Query(query))
        .await
        .unwrap();
    assert!(filtered.get(foreman.as_str(), ProjectScale::Large).is_some());
    assert!(filtered.get(supervisor.as_str(), ProjectScale::Large).is_none());
}

#[tokio::test]
async fn test_derive_statistics_flags_outliers() {
    let role = Role::Foreman.role_name();
    let request = StatisticsRequest {
        role,
        scale: ProjectScale::Large,
        observations: [10.0, 12.0, 14.0, 16.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, k)| ObservationInput {
                project: format!("P{}", i).into(),
                avg_workers: *k,
                avg_headcount: 1.0,
            })
            .collect(),
    };
    let Json(stats) = handlers::derive_statistics(Json(request)).await.unwrap();

    let bounds = stats.outlier_bounds.as_ref().unwrap();
    assert_eq!(bounds.q1, 12.0);
    assert_eq!(bounds.q3, 16.0);
    assert_eq!(bounds.lower, 6.0);
    assert_eq!(bounds.upper, 22.0);
    assert_eq!(stats.outlier_count, 1);
    assert_eq!(stats.median, 14.0);
    assert_eq!(stats.recommended_k, 14.0);
}

#[tokio::test]
async fn test_derive_statistics_without_observations() {
    let request = StatisticsRequest {
        role: Role::Foreman.role_name(),
        scale: ProjectScale::Large,
        observations: vec![],
    };
    let result = handlers::derive_statistics(Json(request)).await;
    assert_eq!(status_of(result), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reload_snapshot() {
    let (state, repo) = state().await;
    let Json(info) = handlers::get_snapshot(State(state.clone())).await.unwrap();

    let Json(unchanged) = handlers::reload_snapshot(State(state.clone())).await.unwrap();
    assert!(!unchanged.changed);
    assert_eq!(unchanged.previous_version, info.version);

    repo.set_position_norms(support::norms_with_master(10.0));
    let Json(reloaded) = handlers::reload_snapshot(State(state.clone())).await.unwrap();
    assert!(reloaded.changed);
    assert_eq!(reloaded.previous_version, info.version);

    let Json(result) =
        handlers::calculate_staffing(State(state), Json(StaffingRequest::new(200)))
            .await
            .unwrap();
    assert_eq!(result.mandatory[2].count, 20);
}

#[tokio::test]
async fn test_failed_reload_keeps_serving() {
    let (state, repo) = state().await;
    let before = state.snapshots.current().version.clone();

    repo.clear();
    let result = handlers::reload_snapshot(State(state.clone())).await;
    assert_eq!(status_of(result), StatusCode::NOT_FOUND);
    assert_eq!(state.snapshots.current().version, before);

    let Json(result) =
        handlers::calculate_staffing(State(state), Json(StaffingRequest::new(200)))
            .await
            .unwrap();
    assert_eq!(result.total_mandatory, 23);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_list_projects_with_filters() {
    let (state, _) = state().await;

    let Json(all) = handlers::list_projects(State(state.clone()), Query(ProjectsQuery::default()))
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let query = ProjectsQuery {
        scales: Some("large,medium".to_string()),
        ..Default::default()
    };
    let Json(sized) = handlers::list_projects(State(state.clone()), Query(query))
        .await
        .unwrap();
    assert_eq!(sized.total, 2);

    let query = ProjectsQuery {
        search: Some("СКЛАД".to_string()),
        ..Default::default()
    };
    let Json(found) = handlers::list_projects(State(state.clone()), Query(query))
        .await
        .unwrap();
    assert_eq!(found.total, 1);
    assert_eq!(found.projects[0].project.as_str(), "Склад Восток");

    let query = ProjectsQuery {
        scales: Some("enormous".to_string()),
        ..Default::default()
    };
    let invalid = handlers::list_projects(State(state), Query(query)).await;
    assert_eq!(status_of(invalid), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_project_dynamics() {
    let (state, _) = state().await;

    let Json(found) =
        handlers::get_project_dynamics(State(state.clone()), Path("ЖК Северный".to_string()))
            .await
            .unwrap();
    assert_eq!(found.dynamics.worker_counts, vec![240, 260]);

    let missing =
        handlers::get_project_dynamics(State(state), Path("Нет такого".to_string())).await;
    assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_standards() {
    let (state, _) = state().await;
    let Json(standards) = handlers::get_standards(State(state)).await.unwrap();

    let company = standards.company.unwrap();
    assert_eq!(company.total_projects, 3);
    assert_eq!(company.position_groups_stats[0].position_group, "Мастер");
    assert_eq!(company.position_groups_stats[0].total_count, 16);
    assert_eq!(standards.by_scale.len(), 3);
}

// =============================================================================
// Router
// =============================================================================

#[tokio::test]
async fn test_router_serves_staffing() {
    let (state, _) = state().await;
    let app = create_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/v1/calculator/staffing")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"workers_count": 200}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let result: StaffingResult = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(result.total, 23);

    let request = Request::builder()
        .uri("/v1/projects/unknown/dynamics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
