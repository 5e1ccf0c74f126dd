use models::{fallback_snapshot, FallbackPolicy, Snapshot, FALLBACK_NOTICE};
use serde::Serialize;

use crate::error::LoadError;
use crate::notify::{Notification, Notifier};

/// Where the snapshot on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSourceKind {
    Live,
    Sample,
    None,
}

/// Result of one load. `Fallback` carries the sample snapshot together with the
/// failure it replaced; `Unavailable` means nothing can be rendered.
#[derive(Debug)]
pub enum LoadOutcome {
    Fetched(Snapshot),
    Fallback { snapshot: Snapshot, error: LoadError },
    Unavailable { error: LoadError },
}

impl LoadOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            LoadOutcome::Fetched(snapshot) | LoadOutcome::Fallback { snapshot, .. } => {
                Some(snapshot)
            }
            LoadOutcome::Unavailable { .. } => None,
        }
    }

    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            LoadOutcome::Fetched(snapshot) | LoadOutcome::Fallback { snapshot, .. } => {
                Some(snapshot)
            }
            LoadOutcome::Unavailable { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadOutcome::Fetched(_) => None,
            LoadOutcome::Fallback { error, .. } | LoadOutcome::Unavailable { error } => Some(error),
        }
    }

    pub fn source(&self) -> SnapshotSourceKind {
        match self {
            LoadOutcome::Fetched(_) => SnapshotSourceKind::Live,
            LoadOutcome::Fallback { .. } => SnapshotSourceKind::Sample,
            LoadOutcome::Unavailable { .. } => SnapshotSourceKind::None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

/// Applies `policy` to a failed fetch. Under `UseSample` the user is told that
/// sample data is shown; under `Surface` the failure is only logged.
pub fn resolve_failure(
    error: LoadError,
    policy: FallbackPolicy,
    notifier: &dyn Notifier,
) -> LoadOutcome {
    tracing::error!(kind = error.kind(), "Error fetching snapshot: {error}");
    match policy {
        FallbackPolicy::UseSample => {
            notifier.notify(Notification::warning(FALLBACK_NOTICE));
            LoadOutcome::Fallback {
                snapshot: fallback_snapshot(),
                error,
            }
        }
        FallbackPolicy::Surface => LoadOutcome::Unavailable { error },
    }
}
