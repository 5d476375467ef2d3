//! In-memory local repository implementation.
//!
//! Holds the norms documents in memory, which makes it the repository of
//! choice for unit tests and for serving a freshly derived snapshot without
//! touching the filesystem.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, NormsRepository, RepositoryError, RepositoryResult};
use crate::models::{
    file_names, CalculationDetails, CalculatorConfig, MonthlyDynamics, PositionDistributionRecord,
    PositionNorms, ProjectAnalysis,
};
use crate::services::derivation::DerivedNorms;

/// In-memory local repository.
///
/// # Example
/// ```ignore
/// let repo = LocalRepository::new();
/// repo.set_position_norms(norms);
/// let loaded = repo.load_position_norms().await?;
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    calculator_config: Option<CalculatorConfig>,
    position_norms: Option<PositionNorms>,
    calculation_details: Option<CalculationDetails>,
    projects: Vec<ProjectAnalysis>,
    monthly_dynamics: MonthlyDynamics,
    position_distribution: Vec<PositionDistributionRecord>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            calculator_config: None,
            position_norms: None,
            calculation_details: None,
            projects: Vec::new(),
            monthly_dynamics: MonthlyDynamics::default(),
            position_distribution: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository serving the output of a derivation run.
    pub fn from_derived(derived: &DerivedNorms) -> Self {
        let repo = Self::new();
        repo.set_position_norms(derived.position_norms.clone());
        repo.set_calculation_details(derived.calculation_details.clone());
        repo.set_projects(derived.projects.clone());
        repo.set_monthly_dynamics(derived.monthly_dynamics.clone());
        repo.set_position_distribution(derived.position_distribution.clone());
        repo
    }

    pub fn set_calculator_config(&self, config: CalculatorConfig) {
        self.data.write().calculator_config = Some(config);
    }

    pub fn set_position_norms(&self, norms: PositionNorms) {
        self.data.write().position_norms = Some(norms);
    }

    pub fn set_calculation_details(&self, details: CalculationDetails) {
        self.data.write().calculation_details = Some(details);
    }

    pub fn set_projects(&self, projects: Vec<ProjectAnalysis>) {
        self.data.write().projects = projects;
    }

    pub fn set_monthly_dynamics(&self, dynamics: MonthlyDynamics) {
        self.data.write().monthly_dynamics = dynamics;
    }

    pub fn set_position_distribution(&self, records: Vec<PositionDistributionRecord>) {
        self.data.write().position_distribution = records;
    }

    /// Number of analysed projects held.
    pub fn project_count(&self) -> usize {
        self.data.read().projects.len()
    }

    /// Whether the position norms document has been set.
    pub fn has_position_norms(&self) -> bool {
        self.data.read().position_norms.is_some()
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all documents, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Local repository is not healthy")
                .with_operation(operation));
        }
        Ok(())
    }

    /// Helper for documents that must have been set before they can be loaded.
    fn required<T: Clone>(
        &self,
        operation: &str,
        document: &str,
        accessor: impl FnOnce(&LocalData) -> &Option<T>,
    ) -> RepositoryResult<T> {
        self.check_health(operation)?;
        let data = self.data.read();
        accessor(&*data).clone().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Document '{}' has not been loaded", document),
                ErrorContext::new(operation)
                    .with_entity("document")
                    .with_entity_id(document),
            )
        })
    }
}

#[async_trait]
impl NormsRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn load_calculator_config(&self) -> RepositoryResult<CalculatorConfig> {
        self.required(
            "load_calculator_config",
            file_names::CALCULATOR_CONFIG,
            |data| &data.calculator_config,
        )
    }

    async fn load_position_norms(&self) -> RepositoryResult<PositionNorms> {
        self.required(
            "load_position_norms",
            file_names::POSITION_NORMS,
            |data| &data.position_norms,
        )
    }

    async fn load_calculation_details(&self) -> RepositoryResult<CalculationDetails> {
        self.required(
            "load_calculation_details",
            file_names::CALCULATION_DETAILS,
            |data| &data.calculation_details,
        )
    }

    async fn load_projects(&self) -> RepositoryResult<Vec<ProjectAnalysis>> {
        self.check_health("load_projects")?;
        Ok(self.data.read().projects.clone())
    }

    async fn load_monthly_dynamics(&self) -> RepositoryResult<MonthlyDynamics> {
        self.check_health("load_monthly_dynamics")?;
        Ok(self.data.read().monthly_dynamics.clone())
    }

    async fn load_position_distribution(&self) -> RepositoryResult<Vec<PositionDistributionRecord>> {
        self.check_health("load_position_distribution")?;
        Ok(self.data.read().position_distribution.clone())
    }
}
