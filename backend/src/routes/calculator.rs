use serde::{Deserialize, Serialize};

use crate::models::{ProjectScale, ScaleBand};

// =========================================================
// Calculator types + routes
// =========================================================

/// Request body for the ratio-based estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRequest {
    #[serde(default)]
    pub project_name: String,
    pub workers_count: i64,
}

/// The scale bands, smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalesResponse {
    pub scales: Vec<ScaleBand>,
}

impl ScalesResponse {
    pub fn all() -> Self {
        Self {
            scales: ProjectScale::ALL.iter().map(ProjectScale::band).collect(),
        }
    }
}

pub const LIST_SCALES: &str = "list_scales";
pub const CALCULATE_STAFFING: &str = "calculate_staffing";
pub const CALCULATE_RATIO: &str = "calculate_ratio";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_response_is_contiguous() {
        let response = ScalesResponse::all();
        assert_eq!(response.scales.len(), 4);
        for pair in response.scales.windows(2) {
            assert_eq!(pair[0].upper_bound, Some(pair[1].lower_bound));
        }
        assert_eq!(response.scales[0].lower_bound, 0);
        assert!(response.scales[3].upper_bound.is_none());
    }

    #[test]
    fn test_ratio_request_defaults_project_name() {
        let request: RatioRequest = serde_json::from_str(r#"{"workers_count": 120}"#).unwrap();
        assert_eq!(request.project_name, "");
        assert_eq!(request.workers_count, 120);
    }
}
