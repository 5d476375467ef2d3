//! Offline derivation of the norms documents from raw time-card records.
//!
//! Records are grouped per project and calendar month. Every figure is built
//! from monthly unique headcounts, never from unique people over the whole
//! period, because staff move between months. The resulting observations feed
//! [`derive_statistics`] once per (role, scale) pair.

use std::collections::{BTreeMap, BTreeSet};

use crate::algorithms::statistics::median_sorted;
use crate::algorithms::{derive_statistics, round_to};
use crate::error::{NormsError, NormsResult};
use crate::models::{
    CalculationDetails, ItrRecord, MonthlyDynamics, PositionDistributionRecord, PositionNorms,
    ProjectAnalysis, ProjectDynamics, ProjectName, ProjectObservation, ProjectScale, RoleName,
    WorkerRecord,
};

use super::coefficients::CoefficientTable;

/// Calendar months as they appear in the time-card exports.
pub const MONTHS: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Working hours in one full-time month.
pub const HOURS_PER_FTE: f64 = 200.0;

pub fn month_index(month: &str) -> Option<usize> {
    let month = month.trim();
    MONTHS.iter().position(|m| *m == month)
}

/// Everything one derivation run produces.
#[derive(Debug, Clone, Default)]
pub struct DerivedNorms {
    /// Sorted by average monthly workers, largest first.
    pub projects: Vec<ProjectAnalysis>,
    /// Sorted by project, then position group.
    pub position_distribution: Vec<PositionDistributionRecord>,
    pub monthly_dynamics: MonthlyDynamics,
    pub observations: BTreeMap<(RoleName, ProjectScale), Vec<ProjectObservation>>,
    pub position_norms: PositionNorms,
    pub calculation_details: CalculationDetails,
    /// Pairs for which no statistics could be derived.
    pub skipped: Vec<NormsError>,
    /// Records dropped because their month could not be recognised.
    pub ignored_records: usize,
}

impl DerivedNorms {
    /// A fresh coefficient table from the derived norms.
    pub fn coefficient_table(&self) -> NormsResult<CoefficientTable> {
        CoefficientTable::from_norms(&self.position_norms)
    }
}

#[derive(Debug, Default)]
struct MonthData {
    workers: BTreeSet<String>,
    worker_hours: f64,
    itr: BTreeMap<RoleName, BTreeSet<String>>,
    itr_hours: BTreeMap<RoleName, f64>,
}

/// One month of one position group on a project.
#[derive(Debug, Clone, Copy)]
struct RoleMonth {
    headcount: u32,
    workers: u32,
}

/// Run the whole batch over raw records.
pub fn derive_norms(itr_records: &[ItrRecord], worker_records: &[WorkerRecord]) -> DerivedNorms {
    let mut derived = DerivedNorms::default();
    let mut by_project: BTreeMap<ProjectName, BTreeMap<usize, MonthData>> = BTreeMap::new();

    for record in worker_records {
        let Some(month) = month_index(&record.month) else {
            derived.ignored_records += 1;
            continue;
        };
        let data = by_project
            .entry(record.project.clone())
            .or_default()
            .entry(month)
            .or_default();
        data.workers.insert(record.personnel_number.clone());
        data.worker_hours += record.hours;
    }

    for record in itr_records {
        let Some(month) = month_index(&record.month) else {
            derived.ignored_records += 1;
            continue;
        };
        let data = by_project
            .entry(record.project.clone())
            .or_default()
            .entry(month)
            .or_default();
        data.itr
            .entry(record.position_group.clone())
            .or_default()
            .insert(record.personnel_number.clone());
        *data.itr_hours.entry(record.position_group.clone()).or_default() += record.hours;
    }

    if derived.ignored_records > 0 {
        log::warn!(
            "Ignored {} time-card records with an unrecognised month",
            derived.ignored_records
        );
    }

    for (project, months) in &by_project {
        derive_project(project, months, &mut derived);
    }

    derived.projects.sort_by(|a, b| {
        b.workers_count_avg_monthly
            .total_cmp(&a.workers_count_avg_monthly)
    });
    derived.position_distribution.sort_by(|a, b| {
        (&a.project, &a.position_group).cmp(&(&b.project, &b.position_group))
    });

    for ((role, scale), observations) in &derived.observations {
        match derive_statistics(role, *scale, observations) {
            Ok(stats) => {
                derived
                    .position_norms
                    .insert(role.clone(), *scale, stats.to_scale_norm());
                derived
                    .calculation_details
                    .insert(role.clone(), *scale, stats);
            }
            Err(err) => {
                log::debug!("Skipping statistics for ({}, {}): {}", role, scale, err);
                derived.skipped.push(err);
            }
        }
    }

    log::info!(
        "Derived norms from {} ITR and {} worker records: {} projects, {} (role, scale) pairs, {} skipped",
        itr_records.len(),
        worker_records.len(),
        derived.projects.len(),
        derived.calculation_details.0.values().map(|m| m.len()).sum::<usize>(),
        derived.skipped.len()
    );

    derived
}

fn derive_project(
    project: &ProjectName,
    months: &BTreeMap<usize, MonthData>,
    derived: &mut DerivedNorms,
) {
    let mut worker_counts: Vec<f64> = Vec::new();
    let mut worker_hours = 0.0;
    let mut itr_counts: Vec<f64> = Vec::new();
    let mut itr_hours = 0.0;
    // (ITR per 100 workers, workers) for months with any ITR staff
    let mut ratios: Vec<(f64, f64)> = Vec::new();
    let mut role_months: BTreeMap<RoleName, Vec<RoleMonth>> = BTreeMap::new();
    let mut dynamics = ProjectDynamics::default();

    for (&month, data) in months {
        let workers = data.workers.len() as u32;
        if workers == 0 {
            continue;
        }
        worker_counts.push(workers as f64);
        worker_hours += data.worker_hours;

        let mut month_itr = 0u32;
        let mut month_itr_hours = 0.0;
        for (group, people) in &data.itr {
            let headcount = people.len() as u32;
            month_itr += headcount;
            month_itr_hours += data.itr_hours.get(group).copied().unwrap_or(0.0);
            role_months
                .entry(group.clone())
                .or_default()
                .push(RoleMonth { headcount, workers });
        }

        let itr_per_100 = month_itr as f64 / workers as f64 * 100.0;
        if month_itr > 0 {
            itr_counts.push(month_itr as f64);
            itr_hours += month_itr_hours;
            ratios.push((itr_per_100, workers as f64));
        }

        dynamics.months.push(MONTHS[month].to_string());
        dynamics.itr_counts.push(month_itr);
        dynamics.worker_counts.push(workers);
        dynamics.itr_per_100.push(round_to(itr_per_100, 2));
    }

    if worker_counts.is_empty() {
        log::debug!("Project '{}' has no months with workers; skipped", project);
        return;
    }

    let avg_workers = mean(&worker_counts);
    let scale = ProjectScale::for_average(avg_workers);

    let ratio_weight: f64 = ratios.iter().map(|(_, w)| w).sum();
    let itr_per_100_workers = if ratio_weight > 0.0 {
        ratios.iter().map(|(r, w)| r * w).sum::<f64>() / ratio_weight
    } else {
        0.0
    };

    let unique_itr: BTreeSet<&String> = months
        .values()
        .flat_map(|data| data.itr.values().flatten())
        .collect();
    let unique_workers: BTreeSet<&String> =
        months.values().flat_map(|data| data.workers.iter()).collect();

    derived.projects.push(ProjectAnalysis {
        project: project.clone(),
        itr_count: unique_itr.len() as u32,
        itr_count_avg_monthly: if itr_counts.is_empty() {
            0.0
        } else {
            round_to(mean(&itr_counts), 1)
        },
        itr_count_median_monthly: round_to(median(&itr_counts), 1),
        itr_hours,
        workers_count: unique_workers.len() as u32,
        workers_count_avg_monthly: round_to(avg_workers, 1),
        workers_count_median_monthly: round_to(median(&worker_counts), 1),
        workers_hours: worker_hours,
        itr_per_100_workers: round_to(itr_per_100_workers, 2),
        itr_fte: round_to(itr_hours / HOURS_PER_FTE, 2),
        workers_fte: round_to(worker_hours / HOURS_PER_FTE, 2),
        project_scale: scale,
        months_active: worker_counts.len() as u32,
    });

    for (group, monthly) in &role_months {
        let unique_in_group: BTreeSet<&String> = months
            .values()
            .filter_map(|data| data.itr.get(group))
            .flatten()
            .collect();

        let weight: f64 = monthly.iter().map(|m| m.workers as f64).sum();
        let weighted_headcount = monthly
            .iter()
            .map(|m| m.headcount as f64 * m.workers as f64)
            .sum::<f64>()
            / weight;
        let headcounts: Vec<f64> = monthly.iter().map(|m| m.headcount as f64).collect();
        let monthly_k: Vec<f64> = monthly
            .iter()
            .map(|m| m.workers as f64 / m.headcount as f64)
            .collect();

        derived.position_distribution.push(PositionDistributionRecord {
            project: project.clone(),
            position_group: group.clone(),
            count: unique_in_group.len() as u32,
            count_avg_monthly: round_to(weighted_headcount, 2),
            count_median_monthly: round_to(median(&headcounts), 1),
            k_avg: Some(round_to(mean(&monthly_k), 1)),
            k_median: Some(round_to(median(&monthly_k), 1)),
            project_scale: scale,
            avg_workers_monthly: round_to(avg_workers, 1),
        });

        // Averages over the months this group was staffed.
        let role_workers: Vec<f64> = monthly.iter().map(|m| m.workers as f64).collect();
        match ProjectObservation::new(
            project.clone(),
            group.clone(),
            scale,
            mean(&role_workers),
            mean(&headcounts),
        ) {
            Ok(observation) => derived
                .observations
                .entry((group.clone(), scale))
                .or_default()
                .push(observation),
            Err(err) => {
                log::warn!(
                    "Dropping observation for project '{}', group '{}': {}",
                    project,
                    group,
                    err
                );
            }
        }
    }

    derived.monthly_dynamics.0.insert(project.clone(), dynamics);
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_sorted(&sorted)
}

#[cfg(test)]
#[path = "derivation_tests.rs"]
mod derivation_tests;
