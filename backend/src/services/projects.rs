//! Historical project browsing and company-wide standards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::algorithms::round_to;
use crate::algorithms::statistics::median_sorted;
use crate::models::{PositionDistributionRecord, ProjectAnalysis, ProjectScale};

/// Project list filters. Every bound is inclusive; absent bounds do not filter.
///
/// Worker and ITR bounds apply to the average monthly counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFilters {
    #[serde(default)]
    pub scales: Vec<ProjectScale>,
    #[serde(default)]
    pub min_workers: Option<f64>,
    #[serde(default)]
    pub max_workers: Option<f64>,
    #[serde(default)]
    pub min_itr: Option<f64>,
    #[serde(default)]
    pub max_itr: Option<f64>,
    /// Case-insensitive substring of the project name.
    #[serde(default)]
    pub search: Option<String>,
}

impl ProjectFilters {
    pub fn matches(&self, project: &ProjectAnalysis) -> bool {
        if !self.scales.is_empty() && !self.scales.contains(&project.project_scale) {
            return false;
        }

        let workers = project.workers_count_avg_monthly;
        let itr = project.itr_count_avg_monthly;
        let within = |value: f64, min: Option<f64>, max: Option<f64>| {
            min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
        };
        if !within(workers, self.min_workers, self.max_workers)
            || !within(itr, self.min_itr, self.max_itr)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => project
                .project
                .as_str()
                .to_lowercase()
                .contains(&query.to_lowercase()),
            _ => true,
        }
    }
}

/// Projects passing `filters`, in their original order.
pub fn filter_projects(projects: &[ProjectAnalysis], filters: &ProjectFilters) -> Vec<ProjectAnalysis> {
    projects
        .iter()
        .filter(|project| filters.matches(project))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGroupStat {
    pub position_group: String,
    pub total_count: u32,
    /// Share of all ITR staff, in percent.
    pub percentage: f64,
    pub avg_per_project: f64,
    pub present_in_projects: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyStandards {
    pub total_projects: usize,
    pub total_itr: u32,
    pub total_workers: u32,
    pub average_itr_per_100_workers: f64,
    pub median_itr_per_100_workers: f64,
    pub min_itr_per_100_workers: f64,
    pub max_itr_per_100_workers: f64,
    /// Largest groups first.
    pub position_groups_stats: Vec<PositionGroupStat>,
    /// Project count per scale; every scale is present.
    pub scale_distribution: BTreeMap<ProjectScale, usize>,
}

/// Company-wide summary; `None` when there are no projects.
pub fn company_standards(
    projects: &[ProjectAnalysis],
    distribution: &[PositionDistributionRecord],
) -> Option<CompanyStandards> {
    if projects.is_empty() {
        return None;
    }

    let mut ratios: Vec<f64> = projects.iter().map(|p| p.itr_per_100_workers).collect();
    ratios.sort_by(f64::total_cmp);
    let average = ratios.iter().sum::<f64>() / ratios.len() as f64;

    let mut scale_distribution: BTreeMap<ProjectScale, usize> =
        ProjectScale::ALL.into_iter().map(|scale| (scale, 0)).collect();
    for project in projects {
        *scale_distribution.entry(project.project_scale).or_default() += 1;
    }

    let mut groups: BTreeMap<&str, (u32, BTreeSet<&str>)> = BTreeMap::new();
    for record in distribution {
        let entry = groups.entry(record.position_group.as_str()).or_default();
        entry.0 += record.count;
        entry.1.insert(record.project.as_str());
    }
    let all_staff: u32 = groups.values().map(|(count, _)| count).sum();
    let mut position_groups_stats: Vec<PositionGroupStat> = groups
        .into_iter()
        .map(|(group, (total_count, projects))| PositionGroupStat {
            position_group: group.to_string(),
            total_count,
            percentage: if all_staff > 0 {
                round_to(total_count as f64 / all_staff as f64 * 100.0, 1)
            } else {
                0.0
            },
            avg_per_project: round_to(total_count as f64 / projects.len() as f64, 1),
            present_in_projects: projects.len(),
        })
        .collect();
    position_groups_stats.sort_by(|a, b| b.total_count.cmp(&a.total_count));

    Some(CompanyStandards {
        total_projects: projects.len(),
        total_itr: projects.iter().map(|p| p.itr_count).sum(),
        total_workers: projects.iter().map(|p| p.workers_count).sum(),
        average_itr_per_100_workers: round_to(average, 2),
        median_itr_per_100_workers: round_to(median_sorted(&ratios), 2),
        min_itr_per_100_workers: ratios[0],
        max_itr_per_100_workers: ratios[ratios.len() - 1],
        position_groups_stats,
        scale_distribution,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleStandard {
    pub scale: ProjectScale,
    pub projects_count: usize,
    pub avg_workers: f64,
    pub avg_itr: f64,
    pub avg_itr_per_100_workers: f64,
    pub median_itr_per_100_workers: f64,
}

/// Per-scale averages over monthly counts, for scales with at least one project.
pub fn scale_based_standards(projects: &[ProjectAnalysis]) -> Vec<ScaleStandard> {
    ProjectScale::ALL
        .into_iter()
        .filter_map(|scale| {
            let members: Vec<&ProjectAnalysis> = projects
                .iter()
                .filter(|p| p.project_scale == scale)
                .collect();
            if members.is_empty() {
                return None;
            }
            let n = members.len() as f64;
            let mut ratios: Vec<f64> = members.iter().map(|p| p.itr_per_100_workers).collect();
            ratios.sort_by(f64::total_cmp);

            Some(ScaleStandard {
                scale,
                projects_count: members.len(),
                avg_workers: round_to(
                    members.iter().map(|p| p.workers_count_avg_monthly).sum::<f64>() / n,
                    1,
                ),
                avg_itr: round_to(
                    members.iter().map(|p| p.itr_count_avg_monthly).sum::<f64>() / n,
                    1,
                ),
                avg_itr_per_100_workers: round_to(ratios.iter().sum::<f64>() / n, 2),
                median_itr_per_100_workers: round_to(median_sorted(&ratios), 2),
            })
        })
        .collect()
}
