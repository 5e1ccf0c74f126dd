use anyhow::Result;
use models::Session;
use snapshot_client::{CollectingNotifier, Notifier, SnapshotSource};
use std::{fs, path::Path};

pub mod breakdown;
pub mod format;
pub mod page;
pub mod render;
pub mod series;

pub use breakdown::{financial_breakdown, utilization_breakdown, Breakdown, Slice, SliceUnit};
pub use page::{build_page, dashboard_state, DashboardOptions, DashboardPage, DashboardState};
pub use render::{render_page, render_state};
pub use series::{claim_points, daily_series, monthly_series, weekly_series, ClaimPoint};

/// One load from `source`, then page assembly. Notifications raised while
/// loading are logged and also attached to the result.
pub async fn generate_dashboard(
    source: &dyn SnapshotSource,
    session: &Session,
    options: &DashboardOptions,
) -> DashboardState {
    let collector = CollectingNotifier::new();
    let outcome = source.load(options.fallback, &collector).await;

    let notifications = collector.take();
    for note in &notifications {
        snapshot_client::TracingNotifier.notify(note.clone());
    }

    let state = dashboard_state(&outcome, session, notifications, options);
    tracing::info!(
        source = ?outcome.source(),
        failed = state.is_failed(),
        "dashboard generated"
    );
    state
}

pub fn write_dashboard_json(state: &DashboardState, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(out_path, json)?;
    Ok(())
}
