//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::NormsRepository;
use crate::services::SnapshotStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of the norms and history documents
    pub repository: Arc<dyn NormsRepository>,
    /// Snapshot the calculators read; swapped on reload
    pub snapshots: Arc<SnapshotStore>,
}

impl AppState {
    pub fn new(repository: Arc<dyn NormsRepository>, snapshots: SnapshotStore) -> Self {
        Self {
            repository,
            snapshots: Arc::new(snapshots),
        }
    }
}
