//! Error types for the calculation and statistics core.
//!
//! Core errors are plain values: every variant names the exact role, scale or
//! input field that caused it so callers can render "no recommendation
//! available" with an unambiguous reason.

use crate::models::ProjectScale;

/// Result type for core operations.
pub type NormsResult<T> = Result<T, NormsError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormsError {
    /// A required (role, scale) coefficient is absent from the table.
    #[error("Missing coefficient K for role '{role}' at scale {scale}")]
    MissingCoefficient { role: String, scale: ProjectScale },

    /// Not enough observations to produce the requested statistic.
    #[error("Insufficient data for role '{role}' at scale {scale}: {observations} observation(s)")]
    InsufficientData {
        role: String,
        scale: ProjectScale,
        observations: usize,
    },

    /// Input rejected before any calculation began.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl NormsError {
    pub fn missing_coefficient(role: impl Into<String>, scale: ProjectScale) -> Self {
        Self::MissingCoefficient {
            role: role.into(),
            scale,
        }
    }

    pub fn insufficient_data(
        role: impl Into<String>,
        scale: ProjectScale,
        observations: usize,
    ) -> Self {
        Self::InsufficientData {
            role: role.into(),
            scale,
            observations,
        }
    }

    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
