//! Project scale bands.
//!
//! A project's scale is decided by its (average monthly) worker count. The four
//! bands are ordered, contiguous and together cover `[0, ∞)`, so classification
//! of any non-negative count is total and unique.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four project size bands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectScale {
    Small,
    Medium,
    Large,
    #[serde(rename = "Very Large", alias = "VeryLarge")]
    VeryLarge,
}

impl ProjectScale {
    /// All scales in ascending order of their lower bound.
    pub const ALL: [ProjectScale; 4] = [
        ProjectScale::Small,
        ProjectScale::Medium,
        ProjectScale::Large,
        ProjectScale::VeryLarge,
    ];

    /// Classify a worker count into its band.
    pub fn classify(workers_count: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|scale| scale.contains(workers_count))
            .unwrap_or(ProjectScale::VeryLarge)
    }

    /// Classify an average (possibly fractional) monthly worker count.
    ///
    /// Used by the derivation batch, where a project's size is the mean of its
    /// active months. Same boundaries as [`ProjectScale::classify`].
    pub fn for_average(avg_workers: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|scale| match scale.upper_bound() {
                Some(upper) => avg_workers < upper as f64,
                None => true,
            })
            .unwrap_or(ProjectScale::VeryLarge)
    }

    /// Inclusive lower bound of the band.
    pub fn lower_bound(&self) -> u32 {
        match self {
            ProjectScale::Small => 0,
            ProjectScale::Medium => 50,
            ProjectScale::Large => 150,
            ProjectScale::VeryLarge => 300,
        }
    }

    /// Exclusive upper bound of the band; `None` for the last, unbounded band.
    pub fn upper_bound(&self) -> Option<u32> {
        match self {
            ProjectScale::Small => Some(50),
            ProjectScale::Medium => Some(150),
            ProjectScale::Large => Some(300),
            ProjectScale::VeryLarge => None,
        }
    }

    pub fn contains(&self, workers_count: u32) -> bool {
        workers_count >= self.lower_bound()
            && self.upper_bound().map_or(true, |upper| workers_count < upper)
    }

    /// Short code (S/M/L/XL).
    pub fn code(&self) -> &'static str {
        match self {
            ProjectScale::Small => "S",
            ProjectScale::Medium => "M",
            ProjectScale::Large => "L",
            ProjectScale::VeryLarge => "XL",
        }
    }

    /// Display name, identical to the key used in the norms documents.
    pub fn name(&self) -> &'static str {
        match self {
            ProjectScale::Small => "Small",
            ProjectScale::Medium => "Medium",
            ProjectScale::Large => "Large",
            ProjectScale::VeryLarge => "Very Large",
        }
    }

    /// Label used in the methodology documents.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectScale::Small => "Малый",
            ProjectScale::Medium => "Средний",
            ProjectScale::Large => "Крупный",
            ProjectScale::VeryLarge => "Очень крупный",
        }
    }

    /// Presentation color (hex).
    pub fn color(&self) -> &'static str {
        match self {
            ProjectScale::Small => "#10b981",
            ProjectScale::Medium => "#06b6d4",
            ProjectScale::Large => "#4f46e5",
            ProjectScale::VeryLarge => "#f59e0b",
        }
    }

    /// Band description for API listings.
    pub fn band(&self) -> ScaleBand {
        ScaleBand {
            scale: *self,
            code: self.code().to_string(),
            name: self.name().to_string(),
            label: self.label().to_string(),
            lower_bound: self.lower_bound(),
            upper_bound: self.upper_bound(),
            color: self.color().to_string(),
        }
    }
}

impl fmt::Display for ProjectScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectScale {
    type Err = String;

    /// Accepts the display name, the variant name or the short code,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "small" | "s" => Ok(ProjectScale::Small),
            "medium" | "m" => Ok(ProjectScale::Medium),
            "large" | "l" => Ok(ProjectScale::Large),
            "very large" | "verylarge" | "xl" => Ok(ProjectScale::VeryLarge),
            _ => Err(format!("Unknown project scale: {}", s)),
        }
    }
}

/// Serializable description of one scale band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBand {
    pub scale: ProjectScale,
    pub code: String,
    pub name: String,
    pub label: String,
    pub lower_bound: u32,
    /// Exclusive; absent for the last band.
    pub upper_bound: Option<u32>,
    pub color: String,
}
