//! Repository trait definitions.
//!
//! - [`error`]: Error types for repository operations
//! - [`norms`]: Read access to the norms documents

pub mod error;
pub mod norms;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use norms::NormsRepository;
