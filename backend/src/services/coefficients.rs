//! Scale-dependent K coefficients.
//!
//! A [`CoefficientTable`] is built once (from a position norms document or
//! directly from derived statistics) and then only read. Re-derivation builds a
//! new table; there is no way to mutate one in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithms::KStatistics;
use crate::error::{NormsError, NormsResult};
use crate::models::{PositionNorms, ProjectScale, RoleName};

/// Read access to K coefficients.
///
/// `None` means the role has no data at that scale and must not be computed;
/// implementations never substitute a default.
pub trait CoefficientLookup {
    fn coefficient(&self, role: &str, scale: ProjectScale) -> Option<f64>;
}

/// Operational coefficient for one (role, scale) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCoefficient {
    pub role: RoleName,
    pub scale: ProjectScale,
    /// Workers per one specialist.
    pub value: f64,
    /// Number of historical projects behind the value (0 when unknown).
    pub projects_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientTable {
    entries: BTreeMap<RoleName, BTreeMap<ProjectScale, RoleCoefficient>>,
}

impl CoefficientTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(role, scale, K)` triples.
    pub fn from_entries<R, I>(entries: I) -> NormsResult<Self>
    where
        R: Into<RoleName>,
        I: IntoIterator<Item = (R, ProjectScale, f64)>,
    {
        let mut table = Self::new();
        for (role, scale, value) in entries {
            table.insert(RoleCoefficient {
                role: role.into(),
                scale,
                value,
                projects_count: 0,
            })?;
        }
        Ok(table)
    }

    /// Build a table from the `recommended_K` values of a norms document.
    pub fn from_norms(norms: &PositionNorms) -> NormsResult<Self> {
        let mut table = Self::new();
        for (role, by_scale) in &norms.0 {
            for (scale, norm) in by_scale {
                table.insert(RoleCoefficient {
                    role: role.clone(),
                    scale: *scale,
                    value: norm.recommended_k,
                    projects_count: norm.projects_count,
                })?;
            }
        }
        Ok(table)
    }

    /// Build a table from freshly derived statistics.
    pub fn from_statistics<'a, I>(statistics: I) -> NormsResult<Self>
    where
        I: IntoIterator<Item = &'a KStatistics>,
    {
        let mut table = Self::new();
        for stats in statistics {
            table.insert(RoleCoefficient {
                role: stats.role.clone(),
                scale: stats.scale,
                value: stats.recommended_k,
                projects_count: stats.count,
            })?;
        }
        Ok(table)
    }

    fn insert(&mut self, coefficient: RoleCoefficient) -> NormsResult<()> {
        if !coefficient.value.is_finite() || coefficient.value <= 0.0 {
            return Err(NormsError::invalid_input(
                format!("K[{}][{}]", coefficient.role, coefficient.scale),
                format!(
                    "coefficient must be a positive finite number, got {}",
                    coefficient.value
                ),
            ));
        }
        self.entries
            .entry(coefficient.role.clone())
            .or_default()
            .insert(coefficient.scale, coefficient);
        Ok(())
    }

    pub fn lookup(&self, role: &str, scale: ProjectScale) -> Option<&RoleCoefficient> {
        self.entries.get(role).and_then(|by_scale| by_scale.get(&scale))
    }

    /// All coefficients, ordered by role then scale.
    pub fn iter(&self) -> impl Iterator<Item = &RoleCoefficient> {
        self.entries.values().flat_map(|by_scale| by_scale.values())
    }

    /// Coefficients of one scale.
    pub fn for_scale(&self, scale: ProjectScale) -> Vec<&RoleCoefficient> {
        self.iter().filter(|c| c.scale == scale).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|by_scale| by_scale.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CoefficientLookup for CoefficientTable {
    fn coefficient(&self, role: &str, scale: ProjectScale) -> Option<f64> {
        self.lookup(role, scale).map(|c| c.value)
    }
}
