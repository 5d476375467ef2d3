//! Service layer: the staffing calculators and the work around them.
//!
//! The calculator modules are pure and synchronous. Only [`derivation`] and
//! [`snapshot`] log, and only [`snapshot`] touches a repository.

pub mod aggregate;
pub mod coefficients;
pub mod conditional;
pub mod derivation;
pub mod mandatory;
pub mod projects;
pub mod ratio;
pub mod snapshot;
pub mod staffing;

pub use aggregate::{aggregate, justification_for};
pub use coefficients::{CoefficientLookup, CoefficientTable, RoleCoefficient};
pub use conditional::compute_conditional;
pub use derivation::{derive_norms, DerivedNorms};
pub use mandatory::compute_mandatory;
pub use projects::{
    company_standards, filter_projects, scale_based_standards, CompanyStandards,
    PositionGroupStat, ProjectFilters, ScaleStandard,
};
pub use ratio::{compute_ratio_based, PositionBreakdown, RatioResult};
pub use snapshot::{NormsSnapshot, SnapshotInfo, SnapshotStore};
pub use staffing::compute_staffing;
