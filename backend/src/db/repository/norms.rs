//! Read-only access to the documents making up a norms snapshot.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    CalculationDetails, CalculatorConfig, MonthlyDynamics, PositionDistributionRecord,
    PositionNorms, ProjectAnalysis,
};

/// Repository trait for the norms documents.
///
/// Implementations only read; a new snapshot is produced offline and published
/// by swapping the documents as a whole.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared by the HTTP handlers.
#[async_trait]
pub trait NormsRepository: Send + Sync {
    // ==================== Health ====================

    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Calculator Documents ====================

    /// Configuration of the ratio-based calculator.
    async fn load_calculator_config(&self) -> RepositoryResult<CalculatorConfig>;

    /// `role → scale → norm`; the source of the coefficient table.
    async fn load_position_norms(&self) -> RepositoryResult<PositionNorms>;

    /// Full statistics per (role, scale), kept for audit.
    async fn load_calculation_details(&self) -> RepositoryResult<CalculationDetails>;

    // ==================== Historical Data ====================

    async fn load_projects(&self) -> RepositoryResult<Vec<ProjectAnalysis>>;

    async fn load_monthly_dynamics(&self) -> RepositoryResult<MonthlyDynamics>;

    async fn load_position_distribution(&self) -> RepositoryResult<Vec<PositionDistributionRecord>>;
}
