use serde::{Deserialize, Serialize};

use crate::algorithms::{derive_statistics, KStatistics};
use crate::error::NormsResult;
use crate::models::{
    CalculationDetails, PositionNorms, ProjectName, ProjectObservation, ProjectScale, RoleName,
};
use crate::services::SnapshotInfo;

// =========================================================
// Norms, statistics and snapshot types + routes
// =========================================================

/// The coefficients the calculator currently uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormsResponse {
    pub snapshot: SnapshotInfo,
    pub position_norms: PositionNorms,
}

/// Optional narrowing of the calculation-details document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormsDetailsQuery {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub scale: Option<ProjectScale>,
}

impl NormsDetailsQuery {
    /// Keep only the entries matching the role and scale, when given.
    pub fn apply(&self, details: CalculationDetails) -> CalculationDetails {
        let mut filtered = CalculationDetails::default();
        for (role, by_scale) in details.0 {
            if self.role.as_deref().is_some_and(|r| r != role.as_str()) {
                continue;
            }
            for (scale, stats) in by_scale {
                if self.scale.is_some_and(|s| s != scale) {
                    continue;
                }
                filtered.insert(role.clone(), scale, stats);
            }
        }
        filtered
    }
}

/// One project's monthly averages as supplied by a client.
///
/// K is not accepted here; it is derived from the two averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationInput {
    pub project: ProjectName,
    pub avg_workers: f64,
    pub avg_headcount: f64,
}

/// Ad hoc statistics over caller-supplied observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRequest {
    pub role: RoleName,
    pub scale: ProjectScale,
    pub observations: Vec<ObservationInput>,
}

impl StatisticsRequest {
    /// Validate every observation under the request's role and scale, then
    /// derive the statistics.
    pub fn evaluate(self) -> NormsResult<KStatistics> {
        let observations = self
            .observations
            .into_iter()
            .map(|input| {
                ProjectObservation::new(
                    input.project,
                    self.role.clone(),
                    self.scale,
                    input.avg_workers,
                    input.avg_headcount,
                )
            })
            .collect::<NormsResult<Vec<_>>>()?;
        derive_statistics(&self.role, self.scale, &observations)
    }
}

/// Outcome of a snapshot reload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReloadResponse {
    pub previous_version: String,
    pub snapshot: SnapshotInfo,
    pub changed: bool,
}

pub const GET_NORMS: &str = "get_norms";
pub const GET_NORMS_DETAILS: &str = "get_norms_details";
pub const DERIVE_STATISTICS: &str = "derive_statistics";
pub const GET_SNAPSHOT: &str = "get_snapshot";
pub const RELOAD_SNAPSHOT: &str = "reload_snapshot";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormsError;

    fn observation(project: &str, workers: f64, headcount: f64) -> ObservationInput {
        ObservationInput {
            project: ProjectName::from(project),
            avg_workers: workers,
            avg_headcount: headcount,
        }
    }

    #[test]
    fn test_statistics_request_evaluates() {
        let request = StatisticsRequest {
            role: RoleName::from("Мастер"),
            scale: ProjectScale::Large,
            observations: vec![
                observation("A", 200.0, 10.0),
                observation("B", 300.0, 20.0),
                observation("C", 240.0, 12.0),
            ],
        };
        let stats = request.evaluate().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.recommended_k, 20.0);
    }

    #[test]
    fn test_statistics_request_ignores_client_k() {
        let body = r#"{
            "role": "Мастер",
            "scale": "Large",
            "observations": [
                {"project": "A", "avg_workers": 200.0, "avg_headcount": 10.0, "K": 999.0}
            ]
        }"#;
        let request: StatisticsRequest = serde_json::from_str(body).unwrap();
        let stats = request.evaluate().unwrap();
        assert_eq!(stats.median, 20.0);
    }

    #[test]
    fn test_statistics_request_rejects_bad_observation() {
        let request = StatisticsRequest {
            role: RoleName::from("Мастер"),
            scale: ProjectScale::Large,
            observations: vec![observation("A", 200.0, 0.0)],
        };
        assert!(matches!(
            request.evaluate(),
            Err(NormsError::InvalidInput { ref field, .. }) if field == "avg_headcount"
        ));
    }

    #[test]
    fn test_statistics_request_without_observations() {
        let request = StatisticsRequest {
            role: RoleName::from("Мастер"),
            scale: ProjectScale::Large,
            observations: vec![],
        };
        assert!(matches!(
            request.evaluate(),
            Err(NormsError::InsufficientData { .. })
        ));
    }
}
