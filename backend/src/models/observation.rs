//! Historical per-project observations feeding the statistics engine.

use serde::{Deserialize, Serialize};

use super::{ProjectScale, RoleName};
use crate::error::NormsError;

crate::define_name_type!(ProjectName);

/// One project's monthly-averaged measurement for one role.
///
/// `k` is always `avg_workers / avg_headcount`; construction through
/// [`ProjectObservation::new`] guarantees both are finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectObservation {
    pub project: ProjectName,
    pub role: RoleName,
    pub scale: ProjectScale,
    pub avg_workers: f64,
    pub avg_headcount: f64,
    #[serde(rename = "K")]
    pub k: f64,
}

impl ProjectObservation {
    pub fn new(
        project: impl Into<ProjectName>,
        role: impl Into<RoleName>,
        scale: ProjectScale,
        avg_workers: f64,
        avg_headcount: f64,
    ) -> Result<Self, NormsError> {
        if !avg_workers.is_finite() || avg_workers <= 0.0 {
            return Err(NormsError::invalid_input(
                "avg_workers",
                format!("must be a positive finite number, got {}", avg_workers),
            ));
        }
        if !avg_headcount.is_finite() || avg_headcount <= 0.0 {
            return Err(NormsError::invalid_input(
                "avg_headcount",
                format!("must be a positive finite number, got {}", avg_headcount),
            ));
        }

        Ok(Self {
            project: project.into(),
            role: role.into(),
            scale,
            avg_workers,
            avg_headcount,
            k: avg_workers / avg_headcount,
        })
    }

    /// Re-check an observation that arrived through deserialization.
    pub fn validated(self) -> Result<Self, NormsError> {
        Self::new(
            self.project,
            self.role,
            self.scale,
            self.avg_workers,
            self.avg_headcount,
        )
    }
}
