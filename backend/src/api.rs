//! Public API surface of the crate.
//!
//! Consolidates the request and response types used by the HTTP API and by
//! library callers. All of them derive Serialize for JSON output.

pub use crate::routes::calculator::RatioRequest;
pub use crate::routes::calculator::ScalesResponse;
pub use crate::routes::norms::NormsDetailsQuery;
pub use crate::routes::norms::NormsResponse;
pub use crate::routes::norms::ObservationInput;
pub use crate::routes::norms::ReloadResponse;
pub use crate::routes::norms::StatisticsRequest;
pub use crate::routes::projects::ProjectDynamicsResponse;
pub use crate::routes::projects::ProjectListResponse;
pub use crate::routes::projects::ProjectsQuery;
pub use crate::routes::standards::StandardsResponse;

pub use crate::algorithms::{KStatistics, ObservationVerdict, OutlierBounds, SummaryStats};
pub use crate::error::{NormsError, NormsResult};
pub use crate::models::{
    CalculationDetails, CalculatorConfig, MonthlyDynamics, PositionDistributionRecord,
    PositionNorms, ProjectAnalysis, ProjectDynamics, ProjectName, ProjectObservation,
    ProjectScale, Role, RoleName, ScaleBand, ScaleNorm, ScaleSource, StaffingFactors,
    StaffingLineItem, StaffingRequest, StaffingResult,
};
pub use crate::services::{
    CompanyStandards, PositionBreakdown, PositionGroupStat, RatioResult, ScaleStandard,
    SnapshotInfo,
};

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
