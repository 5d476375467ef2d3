//! Versioned, immutable norms snapshots with atomic hot reload.
//!
//! A [`NormsSnapshot`] bundles everything a calculation reads. The
//! [`SnapshotStore`] hands out `Arc`s to the current snapshot; a reload builds
//! a complete new snapshot first and then swaps the pointer, so a calculation
//! that already holds an `Arc` finishes against the version it started with.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::db::{snapshot_checksum, NormsRepository, RepositoryError, RepositoryResult};
use crate::error::NormsResult;
use crate::models::{
    file_names, CalculatorConfig, PositionNorms, StaffingConstants, StaffingRequest,
    StaffingResult,
};

use super::coefficients::CoefficientTable;
use super::ratio::{compute_ratio_based, RatioResult};
use super::staffing::compute_staffing;

/// Everything the calculators read, frozen at load time.
#[derive(Debug, Clone)]
pub struct NormsSnapshot {
    /// SHA-256 over the documents and constants.
    pub version: String,
    pub loaded_at: DateTime<Utc>,
    pub position_norms: PositionNorms,
    pub coefficients: CoefficientTable,
    pub calculator_config: CalculatorConfig,
    pub constants: StaffingConstants,
}

/// Public description of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotInfo {
    pub version: String,
    pub loaded_at: DateTime<Utc>,
    pub coefficients_count: usize,
    pub roles_count: usize,
    pub data_source: String,
    pub data_period: String,
    pub projects_count: u32,
}

impl NormsSnapshot {
    /// Build a snapshot, validating every coefficient and constant.
    pub fn new(
        position_norms: PositionNorms,
        calculator_config: CalculatorConfig,
        constants: StaffingConstants,
    ) -> NormsResult<Self> {
        constants.validate()?;
        let coefficients = CoefficientTable::from_norms(&position_norms)?;
        let version = fingerprint(&position_norms, &calculator_config, &constants);
        Ok(Self {
            version,
            loaded_at: Utc::now(),
            position_norms,
            coefficients,
            calculator_config,
            constants,
        })
    }

    /// Load the calculator documents from a repository.
    pub async fn load(
        repository: &dyn NormsRepository,
        constants: StaffingConstants,
    ) -> RepositoryResult<Self> {
        let position_norms = repository.load_position_norms().await?;
        let calculator_config = repository.load_calculator_config().await?;
        let snapshot = Self::new(position_norms, calculator_config, constants)
            .map_err(|e| RepositoryError::from(e).with_operation("load_snapshot"))?;
        Ok(snapshot)
    }

    pub fn compute_staffing(&self, request: &StaffingRequest) -> NormsResult<StaffingResult> {
        compute_staffing(request, &self.coefficients, &self.constants)
    }

    pub fn compute_ratio_based(
        &self,
        project_name: &str,
        workers_count: i64,
    ) -> NormsResult<RatioResult> {
        compute_ratio_based(project_name, workers_count, &self.calculator_config)
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            version: self.version.clone(),
            loaded_at: self.loaded_at,
            coefficients_count: self.coefficients.len(),
            roles_count: self.position_norms.roles().count(),
            data_source: self.calculator_config.metadata.source.clone(),
            data_period: self.calculator_config.metadata.data_period.clone(),
            projects_count: self.calculator_config.metadata.projects_count,
        }
    }
}

fn fingerprint(
    norms: &PositionNorms,
    config: &CalculatorConfig,
    constants: &StaffingConstants,
) -> String {
    // Serializing maps of plain data cannot fail; an empty string still yields
    // a stable version.
    let norms = serde_json::to_string(norms).unwrap_or_default();
    let config = serde_json::to_string(config).unwrap_or_default();
    let constants = serde_json::to_string(constants).unwrap_or_default();
    snapshot_checksum([
        (file_names::POSITION_NORMS, norms.as_str()),
        (file_names::CALCULATOR_CONFIG, config.as_str()),
        ("constants", constants.as_str()),
    ])
}

/// Holder of the current snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<NormsSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: NormsSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Load the initial snapshot from a repository.
    pub async fn load(
        repository: &dyn NormsRepository,
        constants: StaffingConstants,
    ) -> RepositoryResult<Self> {
        let snapshot = NormsSnapshot::load(repository, constants).await?;
        log::info!(
            "Loaded norms snapshot {} ({} coefficients)",
            short_version(&snapshot.version),
            snapshot.coefficients.len()
        );
        Ok(Self::new(snapshot))
    }

    /// The snapshot new calculations should use.
    pub fn current(&self) -> Arc<NormsSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn publish(&self, snapshot: NormsSnapshot) -> Arc<NormsSnapshot> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Reload from the repository with the current constants.
    ///
    /// On failure the current snapshot stays in place.
    pub async fn reload(&self, repository: &dyn NormsRepository) -> RepositoryResult<Arc<NormsSnapshot>> {
        let constants = self.current().constants.clone();
        let snapshot = match NormsSnapshot::load(repository, constants).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Snapshot reload failed, keeping current version: {}", e);
                return Err(e);
            }
        };

        let previous = self.publish(snapshot);
        let current = self.current();
        if previous.version == current.version {
            log::info!("Reloaded norms snapshot {} (unchanged)", short_version(&current.version));
        } else {
            log::info!(
                "Published norms snapshot {} (was {})",
                short_version(&current.version),
                short_version(&previous.version)
            );
        }
        Ok(current)
    }
}

fn short_version(version: &str) -> &str {
    version.get(..12).unwrap_or(version)
}
