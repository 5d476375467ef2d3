//! Staffing request and result value types.

use serde::{Deserialize, Serialize};

use super::{ProjectScale, Role};
use crate::error::{NormsError, NormsResult};

/// Largest accepted worker count.
pub const MAX_WORKERS_COUNT: i64 = 1_000_000;

/// Largest accepted vehicle, foreign-worker or security-post count.
pub const MAX_FACTOR_COUNT: i64 = 1_000_000;

/// Largest accepted scaffolding area, in m².
pub const MAX_SCAFFOLD_AREA_M2: f64 = 1.0e9;

/// Optional situational factors driving the conditional roles.
///
/// An absent or zero factor disables its role; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingFactors {
    #[serde(default)]
    pub vehicle_count: Option<i64>,
    #[serde(default)]
    pub scaffold_area_m2: Option<f64>,
    #[serde(default)]
    pub foreign_workers_count: Option<i64>,
    #[serde(default)]
    pub security_posts: Option<i64>,
    /// Security posts are covered around the clock rather than in two shifts.
    #[serde(default)]
    pub round_the_clock_security: bool,
    #[serde(default)]
    pub design_work: bool,
}

impl StaffingFactors {
    /// Reject negative or oversized counts and areas that are negative,
    /// non-finite or oversized.
    pub fn validate(&self) -> NormsResult<()> {
        let counts = [
            ("factors.vehicle_count", self.vehicle_count),
            ("factors.foreign_workers_count", self.foreign_workers_count),
            ("factors.security_posts", self.security_posts),
        ];
        for (field, value) in counts {
            if let Some(v) = value {
                if v < 0 {
                    return Err(NormsError::invalid_input(
                        field,
                        format!("must not be negative, got {}", v),
                    ));
                }
                if v > MAX_FACTOR_COUNT {
                    return Err(NormsError::invalid_input(
                        field,
                        format!("must not exceed {}, got {}", MAX_FACTOR_COUNT, v),
                    ));
                }
            }
        }

        if let Some(area) = self.scaffold_area_m2 {
            if !area.is_finite() || area < 0.0 {
                return Err(NormsError::invalid_input(
                    "factors.scaffold_area_m2",
                    format!("must be a non-negative finite number, got {}", area),
                ));
            }
            if area > MAX_SCAFFOLD_AREA_M2 {
                return Err(NormsError::invalid_input(
                    "factors.scaffold_area_m2",
                    format!("must not exceed {}, got {}", MAX_SCAFFOLD_AREA_M2, area),
                ));
            }
        }

        Ok(())
    }
}

/// Input to a scale-based staffing calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingRequest {
    #[serde(default)]
    pub project_name: Option<String>,
    pub workers_count: i64,
    /// Explicit scale; detected from `workers_count` when absent.
    #[serde(default)]
    pub scale: Option<ProjectScale>,
    #[serde(default)]
    pub factors: StaffingFactors,
}

impl StaffingRequest {
    pub fn new(workers_count: i64) -> Self {
        Self {
            workers_count,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: ProjectScale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_factors(mut self, factors: StaffingFactors) -> Self {
        self.factors = factors;
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Validate the request and return the worker count as an unsigned value.
    ///
    /// A worker count of zero classifies as Small but leaves nothing to
    /// calculate, so it is rejected here together with negative counts.
    pub fn validate(&self) -> NormsResult<u32> {
        if self.workers_count <= 0 {
            return Err(NormsError::invalid_input(
                "workers_count",
                format!("must be a positive integer, got {}", self.workers_count),
            ));
        }
        if self.workers_count > MAX_WORKERS_COUNT {
            return Err(NormsError::invalid_input(
                "workers_count",
                format!(
                    "must not exceed {}, got {}",
                    MAX_WORKERS_COUNT, self.workers_count
                ),
            ));
        }
        let workers = u32::try_from(self.workers_count).map_err(|_| {
            NormsError::invalid_input(
                "workers_count",
                format!("is too large: {}", self.workers_count),
            )
        })?;
        self.factors.validate()?;
        Ok(workers)
    }
}

/// How the scale of a result was decided.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleSource {
    Detected,
    Override,
}

/// Calculation inputs shared by every line item of one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingContext {
    pub project_name: Option<String>,
    pub workers_count: u32,
    pub scale: ProjectScale,
    pub scale_source: ScaleSource,
}

/// One role's computed count with its formula for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingLineItem {
    pub role: Role,
    pub name: String,
    pub position_group: String,
    pub formula: String,
    pub count: u32,
    pub details: String,
    pub enabled: bool,
}

impl StaffingLineItem {
    pub fn enabled(
        role: Role,
        formula: impl Into<String>,
        count: u32,
        details: impl Into<String>,
    ) -> Self {
        Self {
            role,
            name: role.label().to_string(),
            position_group: role.position_group().to_string(),
            formula: formula.into(),
            count,
            details: details.into(),
            enabled: true,
        }
    }

    /// A conditional role whose triggering factor is absent.
    pub fn disabled(role: Role, details: impl Into<String>) -> Self {
        Self {
            role,
            name: role.label().to_string(),
            position_group: role.position_group().to_string(),
            formula: DISABLED_FORMULA.to_string(),
            count: 0,
            details: details.into(),
            enabled: false,
        }
    }
}

/// Formula placeholder carried by disabled line items.
pub const DISABLED_FORMULA: &str = "—";

/// Full output of a scale-based staffing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingResult {
    pub project_name: Option<String>,
    pub workers_count: u32,
    pub scale: ProjectScale,
    pub scale_source: ScaleSource,
    pub mandatory: Vec<StaffingLineItem>,
    pub conditional: Vec<StaffingLineItem>,
    pub total_mandatory: u32,
    pub total_conditional: u32,
    pub total: u32,
    pub itr_per_100_workers: f64,
    /// Rendered from the two lists; not authoritative.
    pub justification: String,
}

/// Divisors and multipliers of the conditional rules.
///
/// These varied between methodology revisions; the defaults follow the latest
/// one, except the security multiplier which defaults to two-shift coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingConstants {
    #[serde(default = "default_vehicles_per_driver")]
    pub vehicles_per_driver: u32,
    #[serde(default = "default_scaffold_area_per_inspector")]
    pub scaffold_area_per_inspector: f64,
    #[serde(default = "default_foreign_workers_per_liaison")]
    pub foreign_workers_per_liaison: u32,
    #[serde(default = "default_security_shift_multiplier")]
    pub security_shift_multiplier: u32,
    #[serde(default = "default_round_the_clock_shift_multiplier")]
    pub round_the_clock_shift_multiplier: u32,
}

fn default_vehicles_per_driver() -> u32 {
    3
}

fn default_scaffold_area_per_inspector() -> f64 {
    1000.0
}

fn default_foreign_workers_per_liaison() -> u32 {
    100
}

fn default_security_shift_multiplier() -> u32 {
    2
}

fn default_round_the_clock_shift_multiplier() -> u32 {
    4
}

impl Default for StaffingConstants {
    fn default() -> Self {
        Self {
            vehicles_per_driver: default_vehicles_per_driver(),
            scaffold_area_per_inspector: default_scaffold_area_per_inspector(),
            foreign_workers_per_liaison: default_foreign_workers_per_liaison(),
            security_shift_multiplier: default_security_shift_multiplier(),
            round_the_clock_shift_multiplier: default_round_the_clock_shift_multiplier(),
        }
    }
}

impl StaffingConstants {
    /// Every divisor and multiplier must be positive.
    pub fn validate(&self) -> NormsResult<()> {
        let integers = [
            ("calculator.vehicles_per_driver", self.vehicles_per_driver),
            (
                "calculator.foreign_workers_per_liaison",
                self.foreign_workers_per_liaison,
            ),
            (
                "calculator.security_shift_multiplier",
                self.security_shift_multiplier,
            ),
            (
                "calculator.round_the_clock_shift_multiplier",
                self.round_the_clock_shift_multiplier,
            ),
        ];
        for (field, value) in integers {
            if value == 0 {
                return Err(NormsError::invalid_input(field, "must be positive"));
            }
        }
        if !self.scaffold_area_per_inspector.is_finite() || self.scaffold_area_per_inspector <= 0.0
        {
            return Err(NormsError::invalid_input(
                "calculator.scaffold_area_per_inspector",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_non_positive_workers() {
        assert!(StaffingRequest::new(0).validate().is_err());
        assert!(StaffingRequest::new(-5).validate().is_err());
        assert_eq!(StaffingRequest::new(120).validate().unwrap(), 120);
    }

    #[test]
    fn test_request_rejects_negative_factors() {
        let request = StaffingRequest::new(100).with_factors(StaffingFactors {
            security_posts: Some(-1),
            ..Default::default()
        });
        let err = request.validate().unwrap_err();
        assert_eq!(
            err,
            NormsError::invalid_input("factors.security_posts", "must not be negative, got -1")
        );
    }

    #[test]
    fn test_request_rejects_non_finite_area() {
        let factors = StaffingFactors {
            scaffold_area_m2: Some(f64::INFINITY),
            ..Default::default()
        };
        assert!(factors.validate().is_err());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: StaffingRequest =
            serde_json::from_str(r#"{"workers_count": 200, "factors": {"security_posts": 2}}"#)
                .unwrap();
        assert_eq!(request.workers_count, 200);
        assert_eq!(request.scale, None);
        assert_eq!(request.factors.security_posts, Some(2));
        assert!(!request.factors.design_work);
    }

    #[test]
    fn test_constants_defaults_and_partial_override() {
        let constants: StaffingConstants =
            serde_json::from_str(r#"{"scaffold_area_per_inspector": 500}"#).unwrap();
        assert_eq!(constants.scaffold_area_per_inspector, 500.0);
        assert_eq!(constants.foreign_workers_per_liaison, 100);
        assert_eq!(constants.security_shift_multiplier, 2);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_constants_reject_zero_divisor() {
        let constants = StaffingConstants {
            vehicles_per_driver: 0,
            ..Default::default()
        };
        assert!(constants.validate().is_err());
    }
}
