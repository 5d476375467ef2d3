//! Numerical building blocks of the staffing norms.
//!
//! - [`statistics`]: outlier-aware K-coefficient statistics
//! - [`rounding`]: ceiling and display rounding shared by the calculators

pub mod rounding;
pub mod statistics;

pub use rounding::{ceil_div, ceil_ratio, round_to};
pub use statistics::{
    derive_statistics, KStatistics, ObservationVerdict, OutlierBounds, SummaryStats,
};
