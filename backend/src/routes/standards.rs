use serde::{Deserialize, Serialize};

use crate::models::{PositionDistributionRecord, ProjectAnalysis};
use crate::services::{company_standards, scale_based_standards, CompanyStandards, ScaleStandard};

// =========================================================
// Standards types + route
// =========================================================

/// Company-wide and per-scale standards from the project history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsResponse {
    /// Absent when there is no project history.
    pub company: Option<CompanyStandards>,
    pub by_scale: Vec<ScaleStandard>,
}

impl StandardsResponse {
    pub fn build(projects: &[ProjectAnalysis], distribution: &[PositionDistributionRecord]) -> Self {
        Self {
            company: company_standards(projects, distribution),
            by_scale: scale_based_standards(projects),
        }
    }
}

pub const GET_STANDARDS: &str = "get_standards";
