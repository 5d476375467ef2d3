//! Data access for the norms documents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / snapshot store                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  NormsRepository trait (repository/) - read interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ FileRepository │ LocalRepository │
//!     │ (data dir)     │ (in-memory)     │
//!     └──────────────────────────────┘
//! ```
//!
//! - `repository`: trait and error types
//! - `repositories`: the two implementations
//! - `factory`: creates a repository from environment or configuration
//! - `repo_config`: `itr-norms.toml` parsing
//! - `checksum`: snapshot versioning
//!
//! There is no process-wide repository: the server builds one at startup and
//! hands it to the handlers through their state.

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use checksum::{calculate_checksum, snapshot_checksum};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::{FileRepository, LocalRepository};
pub use repository::{ErrorContext, NormsRepository, RepositoryError, RepositoryResult};
