//! Shapes of the JSON documents making up a norms snapshot.
//!
//! Field names follow the data files exactly (including the upper-case `K_`
//! prefixes) so existing snapshots parse without conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ProjectName, ProjectScale, RoleName};
use crate::algorithms::statistics::KStatistics;

/// Document file names inside a snapshot directory.
pub mod file_names {
    pub const CALCULATOR_CONFIG: &str = "calculator_config.json";
    pub const POSITION_NORMS: &str = "position_norms_by_scale.json";
    pub const CALCULATION_DETAILS: &str = "monthly_calculation_details.json";
    pub const PROJECTS: &str = "projects_analysis.json";
    pub const MONTHLY_DYNAMICS: &str = "monthly_dynamics.json";
    pub const POSITION_DISTRIBUTION: &str = "position_distribution.json";
}

/// Configuration of the legacy ratio-based calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub base_itr_per_100_workers: f64,
    /// Share of total ITR per position group, in percent.
    pub position_group_percentages: BTreeMap<String, f64>,
    pub metadata: CalculatorMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorMetadata {
    pub source: String,
    pub projects_count: u32,
    pub data_period: String,
}

/// Materialized statistics for one (role, scale) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleNorm {
    pub projects_count: usize,
    #[serde(rename = "K_median")]
    pub k_median: f64,
    #[serde(rename = "K_weighted")]
    pub k_weighted: f64,
    #[serde(rename = "K_avg")]
    pub k_avg: f64,
    #[serde(rename = "K_min")]
    pub k_min: f64,
    #[serde(rename = "K_max")]
    pub k_max: f64,
    #[serde(rename = "recommended_K")]
    pub recommended_k: f64,
}

/// `role → scale → norm`, the backing data of the coefficient table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionNorms(pub BTreeMap<RoleName, BTreeMap<ProjectScale, ScaleNorm>>);

impl PositionNorms {
    pub fn get(&self, role: &str, scale: ProjectScale) -> Option<&ScaleNorm> {
        self.0.get(role).and_then(|by_scale| by_scale.get(&scale))
    }

    pub fn insert(&mut self, role: RoleName, scale: ProjectScale, norm: ScaleNorm) {
        self.0.entry(role).or_default().insert(scale, norm);
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleName> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|by_scale| by_scale.is_empty())
    }
}

/// `role → scale → statistics`, the audit trail of a derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationDetails(pub BTreeMap<RoleName, BTreeMap<ProjectScale, KStatistics>>);

impl CalculationDetails {
    pub fn get(&self, role: &str, scale: ProjectScale) -> Option<&KStatistics> {
        self.0.get(role).and_then(|by_scale| by_scale.get(&scale))
    }

    pub fn insert(&mut self, role: RoleName, scale: ProjectScale, stats: KStatistics) {
        self.0.entry(role).or_default().insert(scale, stats);
    }
}

/// Per-project summary produced by the derivation batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub project: ProjectName,
    /// Unique ITR staff over the whole period.
    pub itr_count: u32,
    pub itr_count_avg_monthly: f64,
    pub itr_count_median_monthly: f64,
    pub itr_hours: f64,
    /// Unique workers over the whole period.
    pub workers_count: u32,
    pub workers_count_avg_monthly: f64,
    pub workers_count_median_monthly: f64,
    pub workers_hours: f64,
    /// Workers-weighted monthly ITR per 100 workers.
    pub itr_per_100_workers: f64,
    pub itr_fte: f64,
    pub workers_fte: f64,
    pub project_scale: ProjectScale,
    pub months_active: u32,
}

/// Monthly series for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDynamics {
    pub months: Vec<String>,
    pub itr_counts: Vec<u32>,
    pub worker_counts: Vec<u32>,
    pub itr_per_100: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyDynamics(pub BTreeMap<ProjectName, ProjectDynamics>);

impl MonthlyDynamics {
    pub fn get(&self, project: &str) -> Option<&ProjectDynamics> {
        self.0.get(project)
    }
}

/// Staffing of one position group on one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDistributionRecord {
    pub project: ProjectName,
    pub position_group: RoleName,
    /// Unique staff over the whole period.
    pub count: u32,
    pub count_avg_monthly: f64,
    pub count_median_monthly: f64,
    #[serde(rename = "K_avg")]
    pub k_avg: Option<f64>,
    #[serde(rename = "K_median")]
    pub k_median: Option<f64>,
    pub project_scale: ProjectScale,
    pub avg_workers_monthly: f64,
}

/// Raw time-card line for an engineering/technical employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItrRecord {
    pub project: ProjectName,
    pub month: String,
    pub position_group: RoleName,
    pub personnel_number: String,
    #[serde(default)]
    pub hours: f64,
}

/// Raw time-card line for a manual worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub project: ProjectName,
    pub month: String,
    pub personnel_number: String,
    #[serde(default)]
    pub hours: f64,
}
