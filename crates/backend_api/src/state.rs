use std::sync::Arc;

use dashboard_engine::DashboardOptions;
use snapshot_client::SnapshotSource;

/// Shared by all requests; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SnapshotSource>,
    pub options: Arc<DashboardOptions>,
}

impl AppState {
    pub fn new(source: Arc<dyn SnapshotSource>, options: DashboardOptions) -> Self {
        Self {
            source,
            options: Arc::new(options),
        }
    }
}
