//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration: environment
//! variables or an `itr-norms.toml` file.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::{FileRepository, LocalRepository};
use super::repository::{NormsRepository, RepositoryError, RepositoryResult};

/// Environment variable selecting the repository type.
pub const REPOSITORY_TYPE_ENV: &str = "REPOSITORY_TYPE";

/// Environment variable holding the documents directory.
pub const DATA_DIR_ENV: &str = "ITR_DATA_DIR";

/// Documents directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// JSON documents in a directory
    Files,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("files", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "files" | "file" | "fs" => Ok(Self::Files),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Reads `REPOSITORY_TYPE`; defaults to Files.
    pub fn from_env() -> Self {
        match std::env::var(REPOSITORY_TYPE_ENV) {
            Ok(val) => val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to files", e);
                Self::Files
            }),
            Err(_) => Self::Files,
        }
    }
}

/// Resolve the documents directory: explicit value, then `ITR_DATA_DIR`, then
/// [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `data_dir` - Documents directory (Files only; resolved from the
    ///   environment when absent)
    pub fn create(
        repo_type: RepositoryType,
        data_dir: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn NormsRepository>> {
        match repo_type {
            RepositoryType::Files => {
                let repo = Self::create_files(resolve_data_dir(data_dir))?;
                Ok(repo as Arc<dyn NormsRepository>)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    pub fn create_files(data_dir: impl Into<PathBuf>) -> RepositoryResult<Arc<FileRepository>> {
        let repo = FileRepository::new(data_dir)?;
        log::info!("Serving norms documents from {}", repo.data_dir().display());
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn NormsRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from `REPOSITORY_TYPE` and `ITR_DATA_DIR`.
    pub fn from_env() -> RepositoryResult<Arc<dyn NormsRepository>> {
        Self::create(RepositoryType::from_env(), None)
    }

    /// Create a repository from a parsed configuration file.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn NormsRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        Self::create(repo_type, config.repository.data_dir.as_deref())
    }

    /// Create a repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn NormsRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_config(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(RepositoryType::from_str("local").unwrap(), RepositoryType::Local);
        assert_eq!(RepositoryType::from_str("Files").unwrap(), RepositoryType::Files);
        assert_eq!(RepositoryType::from_str(" fs ").unwrap(), RepositoryType::Files);
        assert!(RepositoryType::from_str("postgres").is_err());
    }

    #[test]
    fn test_resolve_data_dir_prefers_explicit() {
        assert_eq!(
            resolve_data_dir(Some(Path::new("/srv/norms"))),
            PathBuf::from("/srv/norms")
        );
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_files_repository() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepositoryFactory::create(RepositoryType::Files, Some(dir.path())).unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[test]
    fn test_files_repository_requires_directory() {
        let result = RepositoryFactory::create(
            RepositoryType::Files,
            Some(Path::new("/definitely/not/here")),
        );
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
