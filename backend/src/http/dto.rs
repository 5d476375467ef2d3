//! Data Transfer Objects for the HTTP API.
//!
//! Most DTOs are re-exported from the routes module since they already derive
//! Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    // Calculator
    RatioRequest, RatioResult, ScalesResponse, StaffingRequest, StaffingResult,
    // Norms and statistics
    KStatistics, NormsDetailsQuery, NormsResponse, ReloadResponse, SnapshotInfo,
    StatisticsRequest,
    // Projects
    ProjectDynamicsResponse, ProjectListResponse, ProjectsQuery,
    // Standards
    StandardsResponse,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub repository: String,
    /// Version of the snapshot serving calculations
    pub snapshot_version: String,
}
