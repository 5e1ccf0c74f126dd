use async_trait::async_trait;
use models::{FallbackPolicy, Snapshot};

use crate::error::LoadError;
use crate::notify::Notifier;
use crate::outcome::{resolve_failure, LoadOutcome};

/// Anything that can produce one snapshot per page load.
/// Lets surfaces swap the live endpoint for a fixed one.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn load(&self, policy: FallbackPolicy, notifier: &dyn Notifier) -> LoadOutcome;
}

/// Serves the same snapshot, or the same failure, on every load.
#[derive(Debug, Clone)]
pub struct StaticSnapshotSource {
    snapshot: Option<Snapshot>,
    reason: String,
}

impl StaticSnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            reason: String::new(),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            snapshot: None,
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SnapshotSource for StaticSnapshotSource {
    async fn load(&self, policy: FallbackPolicy, notifier: &dyn Notifier) -> LoadOutcome {
        match &self.snapshot {
            Some(snapshot) => LoadOutcome::Fetched(snapshot.clone()),
            None => resolve_failure(
                LoadError::Unavailable(self.reason.clone()),
                policy,
                notifier,
            ),
        }
    }
}
