//! Outlier-aware statistics over K-coefficient observations.
//!
//! For one (role, scale) pair this computes the summary statistics that are
//! shown side by side for review, flags outliers with the IQR rule and picks
//! the operational coefficient. Conventions:
//!
//! - quartiles use linear interpolation between closest ranks;
//! - the median of an even count is the mean of the two middle values;
//! - the standard deviation is the population one;
//! - outlier bounds are computed once over all observations and never
//!   recomputed after excluding outliers;
//! - the recommended K is the rounded median of **all** observations.

use serde::{Deserialize, Serialize};

use crate::error::{NormsError, NormsResult};
use crate::models::{ProjectName, ProjectObservation, ProjectScale, RoleName};

/// IQR multiplier of the outlier rule.
pub const IQR_FENCE: f64 = 1.5;

/// Observations needed before outlier bounds are computed.
pub const MIN_OBSERVATIONS_FOR_BOUNDS: usize = 2;

/// Median, mean and range of a set of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        Some(Self {
            count: sorted.len(),
            median: median_sorted(&sorted),
            mean: mean(&sorted),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Tukey fences over a set of K values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// `None` when fewer than [`MIN_OBSERVATIONS_FOR_BOUNDS`] values are given.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < MIN_OBSERVATIONS_FOR_BOUNDS {
            return None;
        }
        let sorted = sorted_copy(values);
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_FENCE * iqr,
            upper: q3 + IQR_FENCE * iqr,
        })
    }

    /// Strictly outside `[lower, upper]`.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// One input observation with its outlier verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationVerdict {
    pub project: ProjectName,
    pub avg_workers: f64,
    pub avg_headcount: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub is_outlier: bool,
}

/// Full statistics for one (role, scale) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KStatistics {
    pub role: RoleName,
    pub scale: ProjectScale,
    pub count: usize,
    pub median: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Σ workers / Σ headcount across all observations.
    pub weighted_average: f64,
    /// Absent when there are too few observations for quartiles.
    pub outlier_bounds: Option<OutlierBounds>,
    pub outlier_count: usize,
    pub observations: Vec<ObservationVerdict>,
    /// Statistics over non-outliers only; absent without bounds or when every
    /// observation is an outlier.
    pub without_outliers: Option<SummaryStats>,
    #[serde(rename = "recommended_K")]
    pub recommended_k: f64,
}

impl KStatistics {
    /// Outlier bounds, or `InsufficientData` when they could not be computed.
    pub fn bounds(&self) -> NormsResult<&OutlierBounds> {
        self.outlier_bounds.as_ref().ok_or_else(|| {
            NormsError::insufficient_data(self.role.as_str(), self.scale, self.count)
        })
    }

    pub fn outliers(&self) -> impl Iterator<Item = &ObservationVerdict> {
        self.observations.iter().filter(|o| o.is_outlier)
    }

    /// Materialized norm entry for the position norms document.
    pub fn to_scale_norm(&self) -> crate::models::ScaleNorm {
        crate::models::ScaleNorm {
            projects_count: self.count,
            k_median: self.median,
            k_weighted: self.weighted_average,
            k_avg: self.mean,
            k_min: self.min,
            k_max: self.max,
            recommended_k: self.recommended_k,
        }
    }
}

/// Derive statistics for the observations of one (role, scale) pair.
///
/// Fails with `InsufficientData` for an empty slice and with `InvalidInput`
/// when an observation belongs to another pair or carries non-positive values.
pub fn derive_statistics(
    role: &RoleName,
    scale: ProjectScale,
    observations: &[ProjectObservation],
) -> NormsResult<KStatistics> {
    if observations.is_empty() {
        return Err(NormsError::insufficient_data(role.as_str(), scale, 0));
    }

    for obs in observations {
        validate_observation(role, scale, obs)?;
    }

    let k_values: Vec<f64> = observations.iter().map(|o| o.k).collect();
    let sorted = sorted_copy(&k_values);
    let count = sorted.len();

    let median = median_sorted(&sorted);
    let mean = mean(&sorted);
    let std_dev = population_std_dev(&sorted, mean);

    let total_workers: f64 = observations.iter().map(|o| o.avg_workers).sum();
    let total_headcount: f64 = observations.iter().map(|o| o.avg_headcount).sum();
    let weighted_average = total_workers / total_headcount;

    let outlier_bounds = OutlierBounds::from_values(&k_values);
    let verdicts: Vec<ObservationVerdict> = observations
        .iter()
        .map(|o| ObservationVerdict {
            project: o.project.clone(),
            avg_workers: o.avg_workers,
            avg_headcount: o.avg_headcount,
            k: o.k,
            is_outlier: outlier_bounds
                .as_ref()
                .map_or(false, |bounds| bounds.is_outlier(o.k)),
        })
        .collect();
    let outlier_count = verdicts.iter().filter(|v| v.is_outlier).count();

    let without_outliers = outlier_bounds.as_ref().and_then(|_| {
        let kept: Vec<f64> = verdicts
            .iter()
            .filter(|v| !v.is_outlier)
            .map(|v| v.k)
            .collect();
        SummaryStats::from_values(&kept)
    });

    Ok(KStatistics {
        role: role.clone(),
        scale,
        count,
        median,
        mean,
        min: sorted[0],
        max: sorted[count - 1],
        std_dev,
        weighted_average,
        outlier_bounds,
        outlier_count,
        observations: verdicts,
        without_outliers,
        recommended_k: recommended_coefficient(median),
    })
}

/// Operational coefficient from a median: rounded, and never below one worker
/// per specialist so it can always be divided by.
pub fn recommended_coefficient(median: f64) -> f64 {
    median.round().max(1.0)
}

fn validate_observation(
    role: &RoleName,
    scale: ProjectScale,
    obs: &ProjectObservation,
) -> NormsResult<()> {
    if &obs.role != role || obs.scale != scale {
        return Err(NormsError::invalid_input(
            "observations",
            format!(
                "observation for project '{}' belongs to ({}, {}), expected ({}, {})",
                obs.project, obs.role, obs.scale, role, scale
            ),
        ));
    }
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(obs.avg_workers) || !positive(obs.avg_headcount) || !positive(obs.k) {
        return Err(NormsError::invalid_input(
            "observations",
            format!(
                "observation for project '{}' must have positive finite workers, headcount and K",
                obs.project
            ),
        ));
    }
    Ok(())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median of an ascending, non-empty slice.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Linearly interpolated quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
