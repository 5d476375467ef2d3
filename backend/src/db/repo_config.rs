//! Configuration file support.
//!
//! Reads `itr-norms.toml`: which repository serves the documents and the
//! overridable constants of the conditional staffing rules.
//!
//! ```toml
//! [repository]
//! type = "files"
//! data_dir = "public/data"
//!
//! [calculator]
//! scaffold_area_per_inspector = 1000
//! security_shift_multiplier = 2
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{ErrorContext, RepositoryError};
use crate::models::StaffingConstants;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "itr-norms.toml";

/// Environment variable holding an explicit configuration path.
pub const CONFIG_PATH_ENV: &str = "ITR_CONFIG";

/// Repository configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub calculator: StaffingConstants,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    /// Directory of the JSON documents; `files` repositories only.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_repo_type() -> String {
    "files".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            data_dir: None,
        }
    }
}

impl RepositoryConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Err(RepositoryError)` if the file cannot be read, parsed or holds
    ///   invalid calculator constants
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let context = || {
            ErrorContext::new("load_config")
                .with_entity("file")
                .with_entity_id(path.display())
        };

        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read config file: {}", e),
                context(),
            )
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to parse config file: {}", e),
                context(),
            )
        })?;

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Search for `itr-norms.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(None)` if no file exists in any location
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// `ITR_CONFIG` if set, then the default locations, then built-in defaults.
    pub fn load() -> Result<Self, RepositoryError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(path);
        }
        match Self::from_default_location()? {
            Some(config) => Ok(config),
            None => {
                log::info!("No {} found; using built-in defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    pub fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.calculator.validate().map_err(|e| {
            RepositoryError::configuration_with_context(
                e.to_string(),
                ErrorContext::new("validate_config").with_entity("calculator"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_files_config() {
        let toml = r#"
[repository]
type = "files"
data_dir = "public/data"
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Files);
        assert_eq!(
            config.repository.data_dir.as_deref(),
            Some(Path::new("public/data"))
        );
        assert_eq!(config.calculator, StaffingConstants::default());
    }

    #[test]
    fn test_parse_calculator_overrides() {
        let toml = r#"
[repository]
type = "local"

[calculator]
scaffold_area_per_inspector = 500.0
foreign_workers_per_liaison = 50
"#;

        let config: RepositoryConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.calculator.scaffold_area_per_inspector, 500.0);
        assert_eq!(config.calculator.foreign_workers_per_liaison, 50);
        assert_eq!(config.calculator.vehicles_per_driver, 3);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: RepositoryConfig = toml::from_str("").unwrap();
        assert_eq!(config, RepositoryConfig::default());
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Files);
    }

    #[test]
    fn test_from_file_rejects_zero_divisor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calculator]\nvehicles_per_driver = 0").unwrap();

        let err = RepositoryConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert!(err.to_string().contains("vehicles_per_driver"));
    }

    #[test]
    fn test_from_file_rejects_unknown_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[repository]\ntype = \"postgres\"").unwrap();

        assert!(RepositoryConfig::from_file(file.path()).is_err());
    }
}
