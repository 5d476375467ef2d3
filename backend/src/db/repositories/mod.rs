//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and derived snapshots
//! - `files`: JSON documents in a data directory
pub mod files;
pub mod local;

pub use files::FileRepository;
pub use local::LocalRepository;
