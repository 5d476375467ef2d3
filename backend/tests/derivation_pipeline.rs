//! Time-card records through the derivation batch into a served snapshot.

mod support;

use itr_norms::db::{LocalRepository, NormsRepository};
use itr_norms::models::{
    ItrRecord, ProjectName, ProjectScale, Role, RoleName, StaffingConstants, StaffingRequest,
    WorkerRecord,
};
use itr_norms::services::{derive_norms, SnapshotStore};

fn workers(project: &str, month: &str, n: u32) -> Vec<WorkerRecord> {
    (0..n)
        .map(|i| WorkerRecord {
            project: ProjectName::from(project),
            month: month.to_string(),
            personnel_number: format!("{}-W{:04}", project, i),
            hours: 168.0,
        })
        .collect()
}

fn itr(project: &str, month: &str, role: Role, n: u32) -> Vec<ItrRecord> {
    (0..n)
        .map(|i| ItrRecord {
            project: ProjectName::from(project),
            month: month.to_string(),
            position_group: role.role_name(),
            personnel_number: format!("{}-{:?}-{:03}", project, role, i),
            hours: 168.0,
        })
        .collect()
}

/// Two Large projects: B (200 workers) and C (250 workers), plus a Medium one.
fn records() -> (Vec<ItrRecord>, Vec<WorkerRecord>) {
    let mut itr_records = Vec::new();
    itr_records.extend(itr("B", "Март", Role::SiteSupervisor, 2));
    itr_records.extend(itr("B", "Март", Role::Foreman, 10));
    itr_records.extend(itr("B", "Март", Role::WarehouseSpecialist, 4));
    itr_records.extend(itr("C", "Апрель", Role::SiteSupervisor, 2));
    itr_records.extend(itr("C", "Апрель", Role::Foreman, 10));
    itr_records.extend(itr("C", "Апрель", Role::WarehouseSpecialist, 5));
    itr_records.extend(itr("A", "Январь", Role::Foreman, 4));

    let mut worker_records = Vec::new();
    worker_records.extend(workers("B", "Март", 200));
    worker_records.extend(workers("C", "Апрель", 250));
    worker_records.extend(workers("A", "Январь", 80));
    (itr_records, worker_records)
}

#[test]
fn test_derived_norms_use_medians() {
    let (itr_records, worker_records) = records();
    let derived = derive_norms(&itr_records, &worker_records);

    let k = |role: Role| {
        derived
            .position_norms
            .get(role.position_group(), ProjectScale::Large)
            .map(|norm| norm.recommended_k)
    };
    // medians 112.5, 22.5, 50 rounded half away from zero
    assert_eq!(k(Role::SiteSupervisor), Some(113.0));
    assert_eq!(k(Role::Foreman), Some(23.0));
    assert_eq!(k(Role::WarehouseSpecialist), Some(50.0));

    let medium = derived
        .observations
        .get(&(RoleName::from(Role::Foreman.position_group()), ProjectScale::Medium))
        .unwrap();
    assert_eq!(medium.len(), 1);
    assert_eq!(medium[0].k, 20.0);
}

#[tokio::test]
async fn test_derived_snapshot_serves_calculations() {
    let (itr_records, worker_records) = records();
    let derived = derive_norms(&itr_records, &worker_records);

    let repo = LocalRepository::from_derived(&derived);
    repo.set_calculator_config(support::calculator_config());
    let store = SnapshotStore::load(&repo, StaffingConstants::default()).await.unwrap();

    let result = store
        .current()
        .compute_staffing(&StaffingRequest::new(200))
        .unwrap();
    let counts: Vec<u32> = result.mandatory.iter().map(|item| item.count).collect();
    // ceil(200/113), ceil(200/23), ceil(200/50), ceil(200/50)
    assert_eq!(counts, vec![1, 2, 9, 4, 4, 2]);
    assert_eq!(result.total_mandatory, 22);

    // only the foreman was observed on Medium projects
    let err = store
        .current()
        .compute_staffing(&StaffingRequest::new(100))
        .unwrap_err();
    assert!(err.to_string().contains("Medium"));
}

#[tokio::test]
async fn test_derived_history_is_browsable() {
    let (itr_records, worker_records) = records();
    let derived = derive_norms(&itr_records, &worker_records);
    let repo = LocalRepository::from_derived(&derived);

    let projects = repo.load_projects().await.unwrap();
    let names: Vec<&str> = projects.iter().map(|p| p.project.as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);

    let dynamics = repo.load_monthly_dynamics().await.unwrap();
    assert_eq!(dynamics.get("C").unwrap().months, vec!["Апрель"]);

    let details = repo.load_calculation_details().await.unwrap();
    let stats = details
        .get(Role::Foreman.position_group(), ProjectScale::Large)
        .unwrap();
    assert_eq!(stats.count, 2);
    assert!(stats.outlier_bounds.is_some());
}
