use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use models::{FallbackPolicy, Settings, Snapshot};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};

mod error;
mod notify;
mod outcome;
mod source;

pub use error::LoadError;
pub use notify::{CollectingNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use outcome::{resolve_failure, LoadOutcome, SnapshotSourceKind};
pub use source::{SnapshotSource, StaticSnapshotSource};

/// Where to fetch the snapshot from and how long to wait for it.
#[derive(Debug, Clone)]
pub struct SnapshotClientConfig {
    pub url: String,
    /// `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl SnapshotClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            url: settings.api_url.clone(),
            timeout: settings.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Fetches the claimbook snapshot with a single GET.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    http: Client,
    url: Url,
}

impl SnapshotClient {
    pub fn new(config: SnapshotClientConfig) -> Result<Self> {
        let url = validate_endpoint(&config.url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// One request, no retries. Any non-2xx status or undecodable body is an error.
    pub async fn fetch(&self) -> std::result::Result<Snapshot, LoadError> {
        let url = self.url.to_string();
        tracing::debug!(%url, "fetching snapshot");

        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| LoadError::Transport { url, source })?;
        let snapshot: Snapshot = serde_json::from_slice(&body)?;
        Ok(snapshot)
    }

    /// Fetches and applies `policy` on failure. Never returns an error.
    pub async fn load(&self, policy: FallbackPolicy, notifier: &dyn Notifier) -> LoadOutcome {
        match self.fetch().await {
            Ok(snapshot) => {
                tracing::info!(
                    hospital = %snapshot.hospital_name,
                    claims = snapshot.claims_data.len(),
                    "snapshot fetched"
                );
                LoadOutcome::Fetched(snapshot)
            }
            Err(error) => resolve_failure(error, policy, notifier),
        }
    }
}

#[async_trait]
impl SnapshotSource for SnapshotClient {
    async fn load(&self, policy: FallbackPolicy, notifier: &dyn Notifier) -> LoadOutcome {
        SnapshotClient::load(self, policy, notifier).await
    }
}

fn validate_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid snapshot endpoint: {raw}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(anyhow!(
                "Unsupported scheme '{other}' for snapshot endpoint (use http or https)"
            ))
        }
    }

    if url.host_str().is_none() {
        return Err(anyhow!("Snapshot endpoint is missing a host: {raw}"));
    }

    Ok(url)
}
