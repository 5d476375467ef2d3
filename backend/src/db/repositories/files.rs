//! Repository reading the norms documents from a data directory.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::db::repository::{ErrorContext, NormsRepository, RepositoryError, RepositoryResult};
use crate::models::{
    file_names, CalculationDetails, CalculatorConfig, MonthlyDynamics, PositionDistributionRecord,
    PositionNorms, ProjectAnalysis,
};

/// Reads each document as `<data_dir>/<file name>` on every load.
///
/// Nothing is cached here; caching is the job of the snapshot store, which
/// loads once and republishes only on reload.
#[derive(Debug, Clone)]
pub struct FileRepository {
    data_dir: PathBuf,
}

impl FileRepository {
    /// Create a repository over `data_dir`.
    ///
    /// # Returns
    /// * `Err(RepositoryError)` if the directory does not exist
    pub fn new(data_dir: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let data_dir = data_dir.into();
        if !data_dir.is_dir() {
            return Err(RepositoryError::configuration_with_context(
                format!("Data directory '{}' does not exist", data_dir.display()),
                ErrorContext::new("create_file_repository")
                    .with_entity("directory")
                    .with_entity_id(data_dir.display()),
            ));
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        operation: &str,
        file_name: &str,
    ) -> RepositoryResult<T> {
        let path = self.data_dir.join(file_name);
        let context = || {
            ErrorContext::new(operation)
                .with_entity("document")
                .with_entity_id(file_name)
        };

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepositoryError::not_found_with_context(
                    format!("Document '{}' not found", path.display()),
                    context(),
                ));
            }
            Err(e) => {
                return Err(RepositoryError::internal_with_context(
                    format!("Failed to read '{}': {}", path.display(), e),
                    context(),
                ));
            }
        };

        let document = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::validation_with_context(
                format!("Failed to parse '{}': {}", path.display(), e),
                context(),
            )
        })?;

        log::debug!(
            "Loaded {} ({} bytes) from {}",
            file_name,
            content.len(),
            self.data_dir.display()
        );
        Ok(document)
    }
}

#[async_trait]
impl NormsRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(tokio::fs::metadata(&self.data_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn load_calculator_config(&self) -> RepositoryResult<CalculatorConfig> {
        self.read_document("load_calculator_config", file_names::CALCULATOR_CONFIG)
            .await
    }

    async fn load_position_norms(&self) -> RepositoryResult<PositionNorms> {
        self.read_document("load_position_norms", file_names::POSITION_NORMS)
            .await
    }

    async fn load_calculation_details(&self) -> RepositoryResult<CalculationDetails> {
        self.read_document("load_calculation_details", file_names::CALCULATION_DETAILS)
            .await
    }

    async fn load_projects(&self) -> RepositoryResult<Vec<ProjectAnalysis>> {
        self.read_document("load_projects", file_names::PROJECTS).await
    }

    async fn load_monthly_dynamics(&self) -> RepositoryResult<MonthlyDynamics> {
        self.read_document("load_monthly_dynamics", file_names::MONTHLY_DYNAMICS)
            .await
    }

    async fn load_position_distribution(&self) -> RepositoryResult<Vec<PositionDistributionRecord>> {
        self.read_document(
            "load_position_distribution",
            file_names::POSITION_DISTRIBUTION,
        )
        .await
    }
}
