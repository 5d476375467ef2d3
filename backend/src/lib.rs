//! # ITR Staffing Norms
//!
//! Staffing-norm calculator for engineering and technical (ITR) personnel on
//! construction projects, backed by an outlier-aware K-coefficient statistics
//! engine.
//!
//! A K coefficient is the number of workers served by one specialist. Norms
//! are derived per (role, project scale) from historical time-card data and
//! then applied to a new project's worker count.
//!
//! ## Architecture
//!
//! - [`models`]: scales, roles, observations, staffing requests/results and
//!   the JSON document shapes
//! - [`algorithms`]: rounding and the statistics engine
//! - [`services`]: mandatory/conditional calculators, aggregation, the legacy
//!   ratio calculator, the offline derivation batch, project browsing and the
//!   snapshot store
//! - [`db`]: repository pattern over the norms documents
//! - [`routes`] and [`api`]: request/response types
//! - [`http`]: Axum-based HTTP server (feature `http-server`)
//!
//! ## Example
//!
//! ```no_run
//! use itr_norms::api::StaffingRequest;
//! use itr_norms::db::RepositoryFactory;
//! use itr_norms::models::StaffingConstants;
//! use itr_norms::services::SnapshotStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let repository = RepositoryFactory::create_files("public/data")?;
//! let store = SnapshotStore::load(repository.as_ref(), StaffingConstants::default()).await?;
//! let result = store.current().compute_staffing(&StaffingRequest::new(200))?;
//! println!("{}", result.justification);
//! # Ok(())
//! # }
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
