use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dashboard_engine::{generate_dashboard, render_state, write_dashboard_json, DashboardOptions};
use models::{ClaimOrder, FallbackPolicy, Session};
use snapshot_client::{SnapshotClient, SnapshotClientConfig, SnapshotSource, StaticSnapshotSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Chronological,
    AsReceived,
}

/// Fetch the claimbook snapshot and render the hospital dashboard.
#[derive(Debug, Parser)]
#[command(
    name = "generate-dashboard",
    author,
    version,
    about = "Render the hospital credit/claims dashboard",
    long_about = None
)]
struct Args {
    /// Path to settings.json (defaults apply when omitted and ./settings.json is absent)
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,

    /// Snapshot endpoint, overrides settings and CLAIMBOOK_API_URL
    #[arg(long = "url")]
    url: Option<String>,

    /// Write the dashboard as JSON to this file instead of printing it
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    #[arg(long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Report fetch failures instead of showing sample data
    #[arg(long = "strict")]
    strict: bool,

    /// Skip the network and render the sample snapshot
    #[arg(long = "offline")]
    offline: bool,

    #[arg(long = "order", value_enum)]
    order: Option<OrderArg>,

    /// Seed for the illustrative weekly/monthly series
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Render as this signed-in user
    #[arg(long = "user")]
    user: Option<String>,

    /// Leave out the illustrative weekly/monthly series
    #[arg(long = "no-illustrative")]
    no_illustrative: bool,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "generate_dashboard=info,dashboard_engine=info,snapshot_client=info".into());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    // Logs go to stderr so stdout stays clean for the rendered dashboard.
    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing();

    let mut settings =
        settings_loader::load_layered(args.settings.as_ref()).context("load settings")?;
    if let Some(url) = &args.url {
        settings.api_url = url.clone();
    }

    let mut options = DashboardOptions::from_settings(&settings);
    if args.strict {
        options.fallback = FallbackPolicy::Surface;
    }
    if let Some(order) = args.order {
        options.claim_order = match order {
            OrderArg::Chronological => ClaimOrder::Chronological,
            OrderArg::AsReceived => ClaimOrder::AsReceived,
        };
    }
    if args.no_illustrative {
        options.show_illustrative_series = false;
    }
    options.seed = args.seed;

    let session = match &args.user {
        Some(name) => Session::authenticated(name.clone()),
        None => Session::Anonymous,
    };

    let source: Box<dyn SnapshotSource> = if args.offline {
        Box::new(StaticSnapshotSource::failing("offline mode"))
    } else {
        let config = SnapshotClientConfig::from_settings(&settings);
        let client = SnapshotClient::new(config).context("initialize snapshot client")?;
        tracing::info!(endpoint = %client.url(), "using live snapshot endpoint");
        Box::new(client)
    };

    eprintln!("Loading dashboard data...");
    let state = generate_dashboard(source.as_ref(), &session, &options).await;

    if let Some(out) = &args.out {
        write_dashboard_json(&state, out).context("write dashboard.json")?;
        eprintln!("Done. Written to {}", out.display());
    } else {
        match args.format {
            OutputFormat::Text => print!("{}", render_state(&state)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
        }
    }

    Ok(if state.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
