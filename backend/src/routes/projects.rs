use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{NormsError, NormsResult};
use crate::models::{ProjectAnalysis, ProjectDynamics, ProjectScale};
use crate::services::ProjectFilters;

// =========================================================
// Project browsing types + routes
// =========================================================

/// Query string of the project list.
///
/// `scales` is a comma-separated list accepting anything
/// [`ProjectScale::from_str`] does, e.g. `scales=large,xl`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsQuery {
    #[serde(default)]
    pub scales: Option<String>,
    #[serde(default)]
    pub min_workers: Option<f64>,
    #[serde(default)]
    pub max_workers: Option<f64>,
    #[serde(default)]
    pub min_itr: Option<f64>,
    #[serde(default)]
    pub max_itr: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ProjectsQuery {
    pub fn into_filters(self) -> NormsResult<ProjectFilters> {
        let scales = match self.scales.as_deref() {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| ProjectScale::from_str(s).map_err(|e| NormsError::invalid_input("scales", e)))
                .collect::<NormsResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(ProjectFilters {
            scales,
            min_workers: self.min_workers,
            max_workers: self.max_workers,
            min_itr: self.min_itr,
            max_itr: self.max_itr,
            search: self.search,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectAnalysis>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDynamicsResponse {
    pub project: String,
    #[serde(flatten)]
    pub dynamics: ProjectDynamics,
}

pub const LIST_PROJECTS: &str = "list_projects";
pub const GET_PROJECT_DYNAMICS: &str = "get_project_dynamics";
