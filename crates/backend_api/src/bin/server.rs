use anyhow::Context;
use backend_api::{init_tracing, run_server, AppState};
use dashboard_engine::DashboardOptions;
use snapshot_client::{SnapshotClient, SnapshotClientConfig};
use std::{env, path::PathBuf, sync::Arc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // SETTINGS_PATH is optional; defaults and env overrides apply either way.
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);
    let settings =
        settings_loader::load_layered(settings_path.as_ref()).context("load settings")?;

    let client = SnapshotClient::new(SnapshotClientConfig::from_settings(&settings))
        .context("initialize snapshot client")?;

    tracing::info!(
        endpoint = %client.url(),
        fallback = ?settings.fallback,
        "Claimbook Dashboard API"
    );
    let state = AppState::new(Arc::new(client), DashboardOptions::from_settings(&settings));

    run_server(state, &settings.server.host, settings.server.port).await?;

    Ok(())
}
