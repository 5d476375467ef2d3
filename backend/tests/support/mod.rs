#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Mutex;

use itr_norms::db::LocalRepository;
use itr_norms::models::{
    file_names, CalculatorConfig, CalculatorMetadata, MonthlyDynamics, PositionDistributionRecord,
    PositionNorms, ProjectAnalysis, ProjectDynamics, ProjectName, ProjectScale, Role, RoleName,
    ScaleNorm,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =========================================================
// Document fixtures
// =========================================================

pub fn norm(k: f64, projects_count: usize) -> ScaleNorm {
    ScaleNorm {
        projects_count,
        k_median: k,
        k_weighted: k,
        k_avg: k,
        k_min: k,
        k_max: k,
        recommended_k: k,
    }
}

/// Large: prorab 169, master 19, warehouse 81. Medium: 100, 25, 60.
/// Nothing for Small or Very Large.
pub fn reference_norms() -> PositionNorms {
    norms_with_master(19.0)
}

pub fn norms_with_master(k_master: f64) -> PositionNorms {
    let mut norms = PositionNorms::default();
    norms.insert(Role::SiteSupervisor.role_name(), ProjectScale::Large, norm(169.0, 6));
    norms.insert(Role::Foreman.role_name(), ProjectScale::Large, norm(k_master, 6));
    norms.insert(Role::WarehouseSpecialist.role_name(), ProjectScale::Large, norm(81.0, 5));
    norms.insert(Role::SiteSupervisor.role_name(), ProjectScale::Medium, norm(100.0, 4));
    norms.insert(Role::Foreman.role_name(), ProjectScale::Medium, norm(25.0, 4));
    norms.insert(Role::WarehouseSpecialist.role_name(), ProjectScale::Medium, norm(60.0, 3));
    norms
}

/// Base 10 per 100 workers; lead 5%, master 40%, prorab 25%.
pub fn calculator_config() -> CalculatorConfig {
    let mut percentages = BTreeMap::new();
    percentages.insert("ГИП/Руководитель проекта".to_string(), 5.0);
    percentages.insert("Мастер".to_string(), 40.0);
    percentages.insert("Производитель работ".to_string(), 25.0);
    CalculatorConfig {
        base_itr_per_100_workers: 10.0,
        position_group_percentages: percentages,
        metadata: CalculatorMetadata {
            source: "Табели учета рабочего времени".to_string(),
            projects_count: 3,
            data_period: "Январь-Октябрь 2025".to_string(),
        },
    }
}

pub fn project(name: &str, avg_workers: f64, avg_itr: f64, scale: ProjectScale) -> ProjectAnalysis {
    ProjectAnalysis {
        project: ProjectName::from(name),
        itr_count: avg_itr.ceil() as u32,
        itr_count_avg_monthly: avg_itr,
        itr_count_median_monthly: avg_itr,
        itr_hours: avg_itr * 160.0,
        workers_count: avg_workers.ceil() as u32,
        workers_count_avg_monthly: avg_workers,
        workers_count_median_monthly: avg_workers,
        workers_hours: avg_workers * 160.0,
        itr_per_100_workers: avg_itr / avg_workers * 100.0,
        itr_fte: avg_itr * 0.8,
        workers_fte: avg_workers * 0.8,
        project_scale: scale,
        months_active: 3,
    }
}

/// Three projects: Small, Medium and Large.
pub fn projects() -> Vec<ProjectAnalysis> {
    vec![
        project("ЖК Северный", 250.0, 20.0, ProjectScale::Large),
        project("Склад Восток", 100.0, 10.0, ProjectScale::Medium),
        project("Школа №5", 40.0, 5.0, ProjectScale::Small),
    ]
}

pub fn monthly_dynamics() -> MonthlyDynamics {
    let mut dynamics = MonthlyDynamics::default();
    dynamics.0.insert(
        ProjectName::from("ЖК Северный"),
        ProjectDynamics {
            months: vec!["Январь".to_string(), "Февраль".to_string()],
            itr_counts: vec![18, 22],
            worker_counts: vec![240, 260],
            itr_per_100: vec![7.5, 8.46],
        },
    );
    dynamics
}

pub fn position_distribution() -> Vec<PositionDistributionRecord> {
    let record = |project: &str, group: &str, count: u32, scale: ProjectScale| {
        PositionDistributionRecord {
            project: ProjectName::from(project),
            position_group: RoleName::from(group),
            count,
            count_avg_monthly: count as f64,
            count_median_monthly: count as f64,
            k_avg: None,
            k_median: None,
            project_scale: scale,
            avg_workers_monthly: 100.0,
        }
    };
    vec![
        record("ЖК Северный", "Мастер", 12, ProjectScale::Large),
        record("Склад Восток", "Мастер", 4, ProjectScale::Medium),
        record("ЖК Северный", "Производитель работ", 4, ProjectScale::Large),
    ]
}

/// A local repository holding every fixture document.
pub fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    repo.set_position_norms(reference_norms());
    repo.set_calculator_config(calculator_config());
    repo.set_projects(projects());
    repo.set_monthly_dynamics(monthly_dynamics());
    repo.set_position_distribution(position_distribution());
    repo
}

/// Write the calculator documents into `dir`.
pub fn write_calculator_documents(dir: &Path, norms: &PositionNorms) {
    write_json(dir, file_names::POSITION_NORMS, norms);
    write_json(dir, file_names::CALCULATOR_CONFIG, &calculator_config());
}

pub fn write_json<T: serde::Serialize>(dir: &Path, file_name: &str, value: &T) {
    let content = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(dir.join(file_name), content).unwrap();
}
